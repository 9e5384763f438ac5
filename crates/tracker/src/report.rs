//! Per-metric report rows consumed by the presentation layer: the value
//! for the selected date, the all-time aggregate, the goal classification,
//! and display-formatted strings.

use chrono::NaiveDate;
use launch_core::types::{Funnel, PerformanceStatus};
use serde::Serialize;

use crate::catalog::{Format, Metric};
use crate::derive::LaunchTracker;
use crate::goals::classify;

/// One row of the performance table.
#[derive(Debug, Clone, Serialize)]
pub struct MetricReport {
    pub metric: Metric,
    pub label: &'static str,
    /// Value recorded or derived for the selected date, if any.
    pub value: Option<f64>,
    pub aggregate: f64,
    pub goal: String,
    pub status: PerformanceStatus,
    pub display_value: String,
    pub display_aggregate: String,
    /// Short human-readable summary of the classification.
    pub summary: String,
}

/// Build the report rows for one funnel, in the funnel's display order.
pub fn funnel_report(tracker: &LaunchTracker, funnel: Funnel, date: NaiveDate) -> Vec<MetricReport> {
    Metric::for_funnel(funnel)
        .iter()
        .map(|&metric| {
            let value = tracker.value(metric, date);
            let aggregate = tracker.aggregate(metric);
            let goal = tracker.goal(metric).to_string();
            let status = classify(metric, aggregate, &goal);
            let format = metric.spec().format;
            MetricReport {
                metric,
                label: metric.label(),
                value,
                aggregate,
                goal: goal.clone(),
                status,
                display_value: value.map(|v| format_value(v, format)).unwrap_or_else(|| "—".to_string()),
                display_aggregate: format_value(aggregate, format),
                summary: summarize(status, &goal),
            }
        })
        .collect()
}

fn format_value(value: f64, format: Format) -> String {
    match format {
        Format::Currency => format!("${:.2}", value),
        Format::Percent => format!("{:.1}%", value),
        Format::Count => format!("{:.0}", value),
        Format::Ratio => format!("{:.2}x", value),
    }
}

fn summarize(status: PerformanceStatus, goal: &str) -> String {
    match status {
        PerformanceStatus::Excellent => format!("Beating the {} goal", goal),
        PerformanceStatus::Good => format!("Within the {} goal", goal),
        PerformanceStatus::Warning => format!("Slipping below the {} goal", goal),
        PerformanceStatus::Danger => format!("Well outside the {} goal", goal),
        PerformanceStatus::Neutral => {
            if goal.is_empty() {
                "No goal set".to_string()
            } else {
                "No data yet".to_string()
            }
        }
    }
}
