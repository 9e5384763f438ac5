//! Goal parsing and performance classification.
//!
//! Goals are free text entered next to each metric: a percentage range
//! ("30-40%"), a currency or plain range ("$2-$6", "3-5"), or a single
//! numeric target ("500"). Unparseable text never errors; it just leaves
//! the metric unclassified.

use launch_core::types::PerformanceStatus;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::{Format, Metric, Orientation};

/// A parsed goal specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GoalSpec {
    /// "30-40%" — both bounds are percentages.
    PercentRange { min: f64, max: f64 },
    /// "$2-$6" or a plain "3-5" range.
    CurrencyRange { min: f64, max: f64 },
    /// A single numeric target, e.g. "500".
    Target(f64),
}

static PERCENT_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\s*%?\s*[-–]\s*(\d+(?:\.\d+)?)\s*%$").expect("valid regex")
});
static CURRENCY_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$?\s*(\d+(?:\.\d+)?)\s*[-–]\s*\$?\s*(\d+(?:\.\d+)?)$").expect("valid regex")
});
static BARE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$?\s*(\d+(?:\.\d+)?)\s*%?$").expect("valid regex"));

/// Parse a goal string. First match wins: percentage range, then currency
/// (or plain) range, then bare numeric target.
pub fn parse_goal(goal: &str) -> Option<GoalSpec> {
    let goal = goal.trim();
    if goal.is_empty() {
        return None;
    }

    if let Some(caps) = PERCENT_RANGE.captures(goal) {
        return Some(GoalSpec::PercentRange {
            min: caps[1].parse().ok()?,
            max: caps[2].parse().ok()?,
        });
    }
    if let Some(caps) = CURRENCY_RANGE.captures(goal) {
        return Some(GoalSpec::CurrencyRange {
            min: caps[1].parse().ok()?,
            max: caps[2].parse().ok()?,
        });
    }
    if let Some(caps) = BARE_NUMBER.captures(goal) {
        return Some(GoalSpec::Target(caps[1].parse().ok()?));
    }
    None
}

/// Classify an observed aggregate value against a metric's goal string.
///
/// Returns `Neutral` when there is no data (value of 0) or no usable goal.
/// Pure and stateless.
pub fn classify(metric: Metric, value: f64, goal: &str) -> PerformanceStatus {
    if value == 0.0 {
        return PerformanceStatus::Neutral;
    }
    let Some(spec) = parse_goal(goal) else {
        return PerformanceStatus::Neutral;
    };
    let meta = metric.spec();

    match spec {
        GoalSpec::PercentRange { min, max } | GoalSpec::CurrencyRange { min, max } => {
            classify_range(value, min, max, meta.orientation)
        }
        GoalSpec::Target(target) => {
            // Bare numeric goals on count metrics are monthly targets: the
            // observed value is projected out to 30 days before comparing.
            // Percentage metrics compare directly.
            let projected = if meta.format == Format::Percent {
                value
            } else {
                value * 30.0
            };
            classify_target(projected, target, meta.orientation)
        }
    }
}

fn classify_range(value: f64, min: f64, max: f64, orientation: Orientation) -> PerformanceStatus {
    let tolerance = (max - min) * 0.2;
    match orientation {
        Orientation::LowerIsBetter => {
            if value <= min {
                PerformanceStatus::Excellent
            } else if value <= max {
                PerformanceStatus::Good
            } else if value <= max + tolerance {
                PerformanceStatus::Warning
            } else {
                PerformanceStatus::Danger
            }
        }
        Orientation::HigherIsBetter => {
            if value > max {
                PerformanceStatus::Excellent
            } else if value >= min {
                // Upper half of the goal band still counts as excellent.
                if value >= (min + max) / 2.0 {
                    PerformanceStatus::Excellent
                } else {
                    PerformanceStatus::Good
                }
            } else if value >= min - tolerance {
                PerformanceStatus::Warning
            } else {
                PerformanceStatus::Danger
            }
        }
    }
}

fn classify_target(value: f64, target: f64, orientation: Orientation) -> PerformanceStatus {
    match orientation {
        Orientation::HigherIsBetter => {
            if value >= target * 1.1 {
                PerformanceStatus::Excellent
            } else if value >= target {
                PerformanceStatus::Good
            } else if value >= target * 0.8 {
                PerformanceStatus::Warning
            } else {
                PerformanceStatus::Danger
            }
        }
        Orientation::LowerIsBetter => {
            if value <= target * 0.9 {
                PerformanceStatus::Excellent
            } else if value <= target {
                PerformanceStatus::Good
            } else if value <= target * 1.2 {
                PerformanceStatus::Warning
            } else {
                PerformanceStatus::Danger
            }
        }
    }
}
