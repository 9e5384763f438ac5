//! Launch insights — email performance statistics, rule-based optimization
//! suggestions, and the markdown suggestions document.

pub mod email;
pub mod markdown;
pub mod suggestions;

pub use email::{category_stats, CategoryStats};
pub use markdown::suggestions_document;
pub use suggestions::{generate_suggestions, AggregateSnapshot, Severity, Suggestion};
