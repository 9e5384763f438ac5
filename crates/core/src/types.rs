//! Shared boundary types used across the tracker and insights crates.

use serde::{Deserialize, Serialize};

/// Which conversion path a metric belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Funnel {
    /// Paid-traffic funnel: ad spend through registrations.
    Ads,
    /// Organic funnel: landing page views through sales and ROAS.
    Organic,
}

/// Five-level classification of an observed value against its goal.
/// `Neutral` means no goal was set or no data was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceStatus {
    Excellent,
    Good,
    Warning,
    Danger,
    Neutral,
}

/// Email categories tracked during a live launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailCategory {
    Invite,
    Nurture,
    Reminder,
    SalesPromo,
}

impl EmailCategory {
    pub const ALL: [EmailCategory; 4] = [
        EmailCategory::Invite,
        EmailCategory::Nurture,
        EmailCategory::Reminder,
        EmailCategory::SalesPromo,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EmailCategory::Invite => "Invite",
            EmailCategory::Nurture => "Nurture",
            EmailCategory::Reminder => "Reminder",
            EmailCategory::SalesPromo => "Sales Promo",
        }
    }
}

/// Observed performance of a single sent email.
/// Rates are percentages in the 0–100 range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRecord {
    pub category: EmailCategory,
    pub subject: String,
    pub open_rate: f64,
    pub click_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_category_serde_shape() {
        let json = serde_json::to_string(&EmailCategory::SalesPromo).unwrap();
        assert_eq!(json, "\"sales_promo\"");
        let back: EmailCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EmailCategory::SalesPromo);
    }

    #[test]
    fn test_all_categories_have_labels() {
        for cat in EmailCategory::ALL {
            assert!(!cat.label().is_empty());
        }
    }
}
