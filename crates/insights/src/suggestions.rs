//! Rule-based optimization suggestions.
//!
//! A static, ordered table of independent threshold rules over the current
//! aggregate metric values, followed by a cross-funnel traffic-balance rule
//! and per-category email rules. Every call regenerates the full list from
//! scratch; suggestions carry no identity beyond their position.

use launch_core::types::{EmailCategory, EmailRecord};
use launch_tracker::{LaunchTracker, Metric};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::email::category_stats;

/// Advisory severity of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "✅",
            Severity::Warning => "⚠️",
            Severity::Danger => "🚨",
        }
    }
}

/// One advisory record. The persistence layer stores these verbatim; edits
/// replace the whole list, never individual entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub title: String,
    pub issue: String,
    pub actions: Vec<String>,
}

/// The aggregate values the rule table reads, captured in one place so
/// generation is a pure function of this snapshot.
#[derive(Debug, Clone, Default)]
pub struct AggregateSnapshot {
    pub cost_per_registration: f64,
    pub landing_page_conversion: f64,
    pub click_through_rate: f64,
    pub cost_per_landing_page_view: f64,
    pub live_show_up_rate: f64,
    pub sales_page_conversion: f64,
    pub total_roas: f64,
    pub ad_registrations: f64,
    pub organic_registrations: f64,
    pub emails: Vec<EmailRecord>,
}

impl AggregateSnapshot {
    pub fn from_tracker(tracker: &LaunchTracker) -> Self {
        Self {
            cost_per_registration: tracker.aggregate(Metric::CostPerRegistration),
            landing_page_conversion: tracker.aggregate(Metric::AdPageConversionRate),
            click_through_rate: tracker.aggregate(Metric::AdClickThroughRate),
            cost_per_landing_page_view: tracker.aggregate(Metric::CostPerLandingPageView),
            live_show_up_rate: tracker.aggregate(Metric::LiveShowUpRate),
            sales_page_conversion: tracker.aggregate(Metric::SalesPageConversion),
            total_roas: tracker.aggregate(Metric::TotalRoas),
            ad_registrations: tracker.aggregate(Metric::AdRegistrations),
            organic_registrations: tracker.aggregate(Metric::OrganicRegistrations),
            emails: tracker.emails.clone(),
        }
    }
}

/// When a rule fires relative to its threshold. A metric with no data
/// (aggregate of 0) never triggers anything.
#[derive(Debug, Clone, Copy)]
enum Trigger {
    Above(f64),
    Below(f64),
    AtLeast(f64),
    AtMost(f64),
}

impl Trigger {
    fn fires(&self, value: f64) -> bool {
        if value == 0.0 {
            return false;
        }
        match *self {
            Trigger::Above(t) => value > t,
            Trigger::Below(t) => value < t,
            Trigger::AtLeast(t) => value >= t,
            Trigger::AtMost(t) => value <= t,
        }
    }
}

struct MetricRule {
    value: fn(&AggregateSnapshot) -> f64,
    trigger: Trigger,
    severity: Severity,
    title: &'static str,
    issue: &'static str,
    actions: &'static [&'static str],
}

/// The ordered rule table. Warning and success rules for the same metric
/// use disjoint threshold ranges, so at most one of each pair fires; rules
/// for different metrics are independent and may co-fire.
static METRIC_RULES: &[MetricRule] = &[
    MetricRule {
        value: |s| s.cost_per_registration,
        trigger: Trigger::Above(6.0),
        severity: Severity::Warning,
        title: "High Cost Per Registration",
        issue: "Registrations are costing more than $6 on average.",
        actions: &[
            "Test new ad creative and hooks",
            "Tighten audience targeting",
            "Improve landing page message match with the ad",
        ],
    },
    MetricRule {
        value: |s| s.cost_per_registration,
        trigger: Trigger::AtMost(4.0),
        severity: Severity::Success,
        title: "Cost Per Registration On Track",
        issue: "Registrations are coming in at $4 or less.",
        actions: &["Scale the winning ad sets gradually"],
    },
    MetricRule {
        value: |s| s.landing_page_conversion,
        trigger: Trigger::Below(30.0),
        severity: Severity::Warning,
        title: "Low Landing Page Conversion",
        issue: "Fewer than 30% of paid landing page visitors are registering.",
        actions: &[
            "Simplify the registration form",
            "Rewrite the headline to match the ad promise",
            "Add social proof above the fold",
        ],
    },
    MetricRule {
        value: |s| s.landing_page_conversion,
        trigger: Trigger::AtLeast(40.0),
        severity: Severity::Success,
        title: "Landing Page Converting Well",
        issue: "The paid landing page is converting at 40% or better.",
        actions: &["Keep the current page and drive more traffic to it"],
    },
    MetricRule {
        value: |s| s.click_through_rate,
        trigger: Trigger::Below(1.0),
        severity: Severity::Warning,
        title: "Low Click-Through Rate",
        issue: "Ads are getting clicked less than 1% of the time.",
        actions: &[
            "Refresh ad creative",
            "Test new hooks in the first three seconds",
            "Narrow the audience",
        ],
    },
    MetricRule {
        value: |s| s.click_through_rate,
        trigger: Trigger::AtLeast(2.0),
        severity: Severity::Success,
        title: "Strong Click-Through Rate",
        issue: "Ads are earning a 2%+ click-through rate.",
        actions: &["Reuse the top hooks in upcoming creative"],
    },
    MetricRule {
        value: |s| s.cost_per_landing_page_view,
        trigger: Trigger::Above(2.0),
        severity: Severity::Warning,
        title: "Expensive Landing Page Traffic",
        issue: "Each landing page view is costing more than $2.",
        actions: &[
            "Review placement-level performance",
            "Pause the most expensive ad sets",
        ],
    },
    MetricRule {
        value: |s| s.cost_per_landing_page_view,
        trigger: Trigger::AtMost(1.0),
        severity: Severity::Success,
        title: "Efficient Landing Page Traffic",
        issue: "Landing page views are costing $1 or less.",
        actions: &["Hold current bids and monitor frequency"],
    },
    MetricRule {
        value: |s| s.live_show_up_rate,
        trigger: Trigger::Below(18.0),
        severity: Severity::Warning,
        title: "Low Live Show-Up Rate",
        issue: "Fewer than 18% of registrants are attending live.",
        actions: &[
            "Add a reminder email the morning of the event",
            "Send an SMS reminder 15 minutes before going live",
            "Tease a live-only bonus in the confirmation sequence",
        ],
    },
    MetricRule {
        value: |s| s.live_show_up_rate,
        trigger: Trigger::AtLeast(25.0),
        severity: Severity::Success,
        title: "Healthy Live Show-Up Rate",
        issue: "25% or more of registrants are attending live.",
        actions: &["Keep the current reminder sequence"],
    },
    MetricRule {
        value: |s| s.sales_page_conversion,
        trigger: Trigger::Below(2.0),
        severity: Severity::Warning,
        title: "Low Sales Page Conversion",
        issue: "Fewer than 2% of sales page visitors are buying.",
        actions: &[
            "Restate the offer and guarantee above the fold",
            "Add urgency with a real deadline",
            "Answer pricing objections in the FAQ",
        ],
    },
    MetricRule {
        value: |s| s.sales_page_conversion,
        trigger: Trigger::AtLeast(5.0),
        severity: Severity::Success,
        title: "Sales Page Converting Well",
        issue: "The sales page is converting at 5% or better.",
        actions: &["Drive remaining email traffic to the sales page"],
    },
    MetricRule {
        value: |s| s.total_roas,
        trigger: Trigger::Below(3.0),
        severity: Severity::Warning,
        title: "Low Return On Ad Spend",
        issue: "Revenue is returning less than 3x the ad spend.",
        actions: &[
            "Revisit offer pricing or add an order bump",
            "Improve funnel conversion before scaling spend",
        ],
    },
    MetricRule {
        value: |s| s.total_roas,
        trigger: Trigger::AtLeast(5.0),
        severity: Severity::Success,
        title: "Strong Return On Ad Spend",
        issue: "Revenue is returning 5x or more of the ad spend.",
        actions: &["Increase budget on the best-performing campaigns"],
    },
];

/// Open-rate / click-rate thresholds per email category.
static EMAIL_THRESHOLDS: &[(EmailCategory, f64, f64)] = &[
    (EmailCategory::Invite, 25.0, 2.0),
    (EmailCategory::Nurture, 35.0, 1.0),
    (EmailCategory::Reminder, 25.0, 2.0),
    (EmailCategory::SalesPromo, 25.0, 1.0),
];

/// Generate the full ordered suggestion list from an aggregate snapshot.
/// Deterministic: the same snapshot always yields the same list.
pub fn generate_suggestions(snapshot: &AggregateSnapshot) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    for rule in METRIC_RULES {
        if rule.trigger.fires((rule.value)(snapshot)) {
            suggestions.push(Suggestion {
                severity: rule.severity,
                title: rule.title.to_string(),
                issue: rule.issue.to_string(),
                actions: rule.actions.iter().map(|a| a.to_string()).collect(),
            });
        }
    }

    // Traffic balance across funnels.
    if snapshot.ad_registrations > 0.0
        && snapshot.ad_registrations > snapshot.organic_registrations * 3.0
    {
        suggestions.push(Suggestion {
            severity: Severity::Warning,
            title: "Over-Reliant On Paid Traffic".to_string(),
            issue: "Paid registrations outnumber organic registrations more than 3 to 1."
                .to_string(),
            actions: vec![
                "Grow organic reach with weekly content".to_string(),
                "Add referral and share incentives for registrants".to_string(),
                "Invest in the email nurture list between launches".to_string(),
            ],
        });
    }

    for stats in category_stats(&snapshot.emails) {
        if stats.emails == 0 {
            continue;
        }
        let (_, open_goal, click_goal) = EMAIL_THRESHOLDS
            .iter()
            .find(|(c, _, _)| *c == stats.category)
            .copied()
            .unwrap_or((stats.category, 25.0, 2.0));

        if stats.avg_open_rate >= open_goal && stats.avg_click_rate >= click_goal {
            suggestions.push(Suggestion {
                severity: Severity::Success,
                title: format!("{} Emails Performing Well", stats.category.label()),
                issue: format!(
                    "{} emails are averaging {:.1}% opens and {:.1}% clicks.",
                    stats.category.label(),
                    stats.avg_open_rate,
                    stats.avg_click_rate
                ),
                actions: vec!["Keep the current approach for this sequence".to_string()],
            });
        } else {
            suggestions.push(Suggestion {
                severity: Severity::Warning,
                title: format!("{} Emails Underperforming", stats.category.label()),
                issue: format!(
                    "{} emails are averaging {:.1}% opens and {:.1}% clicks against a {:.0}%/{:.0}% goal.",
                    stats.category.label(),
                    stats.avg_open_rate,
                    stats.avg_click_rate,
                    open_goal,
                    click_goal
                ),
                actions: vec![
                    "Test new subject lines".to_string(),
                    "Resend to non-openers with a different subject".to_string(),
                    "Tighten the call to action to a single link".to_string(),
                ],
            });
        }
    }

    debug!(count = suggestions.len(), "suggestions generated");
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_per_registration_boundary() {
        let mut snapshot = AggregateSnapshot {
            cost_per_registration: 6.0,
            ..Default::default()
        };
        let none = generate_suggestions(&snapshot);
        assert!(
            !none.iter().any(|s| s.title == "High Cost Per Registration"),
            "rule must not fire at exactly $6.00"
        );

        snapshot.cost_per_registration = 6.01;
        let fired = generate_suggestions(&snapshot);
        assert!(fired.iter().any(|s| s.title == "High Cost Per Registration"));
    }

    #[test]
    fn test_no_data_fires_nothing() {
        let suggestions = generate_suggestions(&AggregateSnapshot::default());
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_warning_and_success_never_co_fire_for_one_metric() {
        for value in [0.5, 1.0, 2.0, 3.9, 4.0, 5.0, 6.0, 6.1, 10.0] {
            let snapshot = AggregateSnapshot {
                cost_per_registration: value,
                ..Default::default()
            };
            let suggestions = generate_suggestions(&snapshot);
            let warnings = suggestions
                .iter()
                .filter(|s| s.title.contains("Cost Per Registration") && s.severity == Severity::Warning)
                .count();
            let successes = suggestions
                .iter()
                .filter(|s| s.title.contains("Cost Per Registration") && s.severity == Severity::Success)
                .count();
            assert!(warnings + successes <= 1, "co-fired at {}", value);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let snapshot = AggregateSnapshot {
            cost_per_registration: 7.5,
            landing_page_conversion: 25.0,
            total_roas: 2.0,
            ad_registrations: 900.0,
            organic_registrations: 100.0,
            emails: vec![EmailRecord {
                category: EmailCategory::Invite,
                subject: "You're invited".to_string(),
                open_rate: 20.0,
                click_rate: 1.0,
            }],
            ..Default::default()
        };
        let first = generate_suggestions(&snapshot);
        let second = generate_suggestions(&snapshot);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_paid_traffic_ratio_rule() {
        let snapshot = AggregateSnapshot {
            ad_registrations: 400.0,
            organic_registrations: 100.0,
            ..Default::default()
        };
        let suggestions = generate_suggestions(&snapshot);
        assert!(suggestions.iter().any(|s| s.title == "Over-Reliant On Paid Traffic"));

        let balanced = AggregateSnapshot {
            ad_registrations: 300.0,
            organic_registrations: 100.0,
            ..Default::default()
        };
        assert!(!generate_suggestions(&balanced)
            .iter()
            .any(|s| s.title == "Over-Reliant On Paid Traffic"));
    }

    #[test]
    fn test_email_category_boundary_meets_threshold() {
        // Exactly at the Invite thresholds counts as meeting them.
        let snapshot = AggregateSnapshot {
            emails: vec![EmailRecord {
                category: EmailCategory::Invite,
                subject: "Join us live".to_string(),
                open_rate: 25.0,
                click_rate: 2.0,
            }],
            ..Default::default()
        };
        let suggestions = generate_suggestions(&snapshot);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].severity, Severity::Success);
        assert!(suggestions[0].title.starts_with("Invite"));
    }

    #[test]
    fn test_empty_email_category_contributes_nothing() {
        let snapshot = AggregateSnapshot {
            emails: vec![EmailRecord {
                category: EmailCategory::Nurture,
                subject: "A story".to_string(),
                open_rate: 40.0,
                click_rate: 1.5,
            }],
            ..Default::default()
        };
        let suggestions = generate_suggestions(&snapshot);
        // One Nurture suggestion; Invite/Reminder/Sales Promo are silent.
        assert_eq!(suggestions.len(), 1);
    }
}
