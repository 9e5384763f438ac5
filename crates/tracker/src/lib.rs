//! Live-launch performance tracking — sparse per-date metric storage,
//! derived-metric computation, goal classification, and launch registry.

pub mod catalog;
pub mod derive;
pub mod goals;
pub mod registry;
pub mod report;
pub mod snapshot;
pub mod store;

pub use catalog::{Aggregation, Format, Metric, MetricSpec, Orientation, Role};
pub use derive::LaunchTracker;
pub use goals::{classify, parse_goal, GoalSpec};
pub use registry::LaunchRegistry;
pub use report::{funnel_report, MetricReport};
pub use snapshot::{LaunchSnapshot, MetricEntry};
pub use store::FunnelStore;
