//! Per-category email performance statistics.

use launch_core::types::{EmailCategory, EmailRecord};
use serde::Serialize;

/// Mean open and click rates for one email category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryStats {
    pub category: EmailCategory,
    pub emails: usize,
    pub avg_open_rate: f64,
    pub avg_click_rate: f64,
}

/// Aggregate the email log into one stats row per category, in the fixed
/// category order. Categories with no recorded emails report zero means.
pub fn category_stats(emails: &[EmailRecord]) -> Vec<CategoryStats> {
    EmailCategory::ALL
        .iter()
        .map(|&category| {
            let records: Vec<&EmailRecord> =
                emails.iter().filter(|e| e.category == category).collect();
            let count = records.len();
            let (open, click) = if count == 0 {
                (0.0, 0.0)
            } else {
                (
                    records.iter().map(|e| e.open_rate).sum::<f64>() / count as f64,
                    records.iter().map(|e| e.click_rate).sum::<f64>() / count as f64,
                )
            };
            CategoryStats {
                category,
                emails: count,
                avg_open_rate: open,
                avg_click_rate: click,
            }
        })
        .collect()
}
