//! Metric catalog — the fixed set of tracked metrics and everything the
//! rest of the system needs to know about each one: which funnel it lives
//! in, whether it is entered by hand or derived, how it aggregates across
//! dates, how it is displayed, and which direction counts as better.
//!
//! All metric identity flows through the [`Metric`] enum; nothing else in
//! the codebase matches on metric names or array positions.

use launch_core::types::Funnel;
use serde::{Deserialize, Serialize};

/// Every metric tracked during a live launch, across both funnels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    // Ads funnel
    AdSpend,
    AdClickThroughRate,
    AdLandingPageViews,
    CostPerLandingPageView,
    AdRegistrations,
    AdPageConversionRate,
    CostPerRegistration,

    // Organic funnel
    OrganicLandingPageViews,
    OrganicRegistrations,
    OrganicPageConversionRate,
    LiveShowUpRate,
    SalesPageViews,
    TotalSales,
    SalesPageConversion,
    TotalRevenue,
    TotalRoas,
}

/// Whether a human enters the value or the derivation engine computes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Manual,
    Derived,
}

/// How a metric's per-date values collapse into its all-time aggregate.
/// Counts and currency totals sum; rates, costs, and ratios average over
/// the dates that actually have data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Sum,
    Mean,
}

/// Display formatting for a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Currency,
    Percent,
    Count,
    Ratio,
}

/// Which direction of movement is favorable when classifying against a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    HigherIsBetter,
    LowerIsBetter,
}

/// Everything the store, derivation engine, classifier, and report layer
/// need to know about one metric.
#[derive(Debug, Clone, Copy)]
pub struct MetricSpec {
    pub label: &'static str,
    pub funnel: Funnel,
    pub role: Role,
    pub aggregation: Aggregation,
    pub format: Format,
    pub orientation: Orientation,
    /// Default goal string applied when a snapshot carries none.
    pub default_goal: &'static str,
}

impl Metric {
    /// Ads-funnel metrics in display order.
    pub const ADS: [Metric; 7] = [
        Metric::AdSpend,
        Metric::AdClickThroughRate,
        Metric::AdLandingPageViews,
        Metric::CostPerLandingPageView,
        Metric::AdRegistrations,
        Metric::AdPageConversionRate,
        Metric::CostPerRegistration,
    ];

    /// Organic-funnel metrics in display order.
    pub const ORGANIC: [Metric; 9] = [
        Metric::OrganicLandingPageViews,
        Metric::OrganicRegistrations,
        Metric::OrganicPageConversionRate,
        Metric::LiveShowUpRate,
        Metric::SalesPageViews,
        Metric::TotalSales,
        Metric::SalesPageConversion,
        Metric::TotalRevenue,
        Metric::TotalRoas,
    ];

    pub fn for_funnel(funnel: Funnel) -> &'static [Metric] {
        match funnel {
            Funnel::Ads => &Self::ADS,
            Funnel::Organic => &Self::ORGANIC,
        }
    }

    pub fn spec(&self) -> MetricSpec {
        use Aggregation::*;
        use Format::*;
        use Orientation::*;
        use Role::*;

        match self {
            Metric::AdSpend => MetricSpec {
                label: "Ad Spend",
                funnel: Funnel::Ads,
                role: Manual,
                aggregation: Sum,
                format: Currency,
                orientation: HigherIsBetter,
                default_goal: "",
            },
            Metric::AdClickThroughRate => MetricSpec {
                label: "Click-Through Rate",
                funnel: Funnel::Ads,
                role: Manual,
                aggregation: Mean,
                format: Percent,
                orientation: HigherIsBetter,
                default_goal: "1-3%",
            },
            Metric::AdLandingPageViews => MetricSpec {
                label: "Landing Page Views",
                funnel: Funnel::Ads,
                role: Manual,
                aggregation: Sum,
                format: Count,
                orientation: HigherIsBetter,
                default_goal: "",
            },
            Metric::CostPerLandingPageView => MetricSpec {
                label: "Cost Per Landing Page View",
                funnel: Funnel::Ads,
                role: Derived,
                aggregation: Mean,
                format: Currency,
                orientation: LowerIsBetter,
                default_goal: "$1-$2",
            },
            Metric::AdRegistrations => MetricSpec {
                label: "Registrations",
                funnel: Funnel::Ads,
                role: Manual,
                aggregation: Sum,
                format: Count,
                orientation: HigherIsBetter,
                default_goal: "500",
            },
            Metric::AdPageConversionRate => MetricSpec {
                label: "Landing Page Conversion Rate",
                funnel: Funnel::Ads,
                role: Derived,
                aggregation: Mean,
                format: Percent,
                orientation: HigherIsBetter,
                default_goal: "30-40%",
            },
            Metric::CostPerRegistration => MetricSpec {
                label: "Cost Per Registration",
                funnel: Funnel::Ads,
                role: Derived,
                aggregation: Mean,
                format: Currency,
                orientation: LowerIsBetter,
                default_goal: "$2-$6",
            },
            Metric::OrganicLandingPageViews => MetricSpec {
                label: "Landing Page Views",
                funnel: Funnel::Organic,
                role: Manual,
                aggregation: Sum,
                format: Count,
                orientation: HigherIsBetter,
                default_goal: "",
            },
            Metric::OrganicRegistrations => MetricSpec {
                label: "Registrations",
                funnel: Funnel::Organic,
                role: Manual,
                aggregation: Sum,
                format: Count,
                orientation: HigherIsBetter,
                default_goal: "",
            },
            Metric::OrganicPageConversionRate => MetricSpec {
                label: "Landing Page Conversion Rate",
                funnel: Funnel::Organic,
                role: Derived,
                aggregation: Mean,
                format: Percent,
                orientation: HigherIsBetter,
                default_goal: "30-40%",
            },
            Metric::LiveShowUpRate => MetricSpec {
                label: "Live Show-Up Rate",
                funnel: Funnel::Organic,
                role: Manual,
                aggregation: Mean,
                format: Percent,
                orientation: HigherIsBetter,
                default_goal: "18-25%",
            },
            Metric::SalesPageViews => MetricSpec {
                label: "Sales Page Views",
                funnel: Funnel::Organic,
                role: Manual,
                aggregation: Sum,
                format: Count,
                orientation: HigherIsBetter,
                default_goal: "",
            },
            Metric::TotalSales => MetricSpec {
                label: "Total Sales",
                funnel: Funnel::Organic,
                role: Manual,
                aggregation: Sum,
                format: Count,
                orientation: HigherIsBetter,
                default_goal: "",
            },
            Metric::SalesPageConversion => MetricSpec {
                label: "Sales Page Conversion",
                funnel: Funnel::Organic,
                role: Derived,
                aggregation: Mean,
                format: Percent,
                orientation: HigherIsBetter,
                default_goal: "2-5%",
            },
            Metric::TotalRevenue => MetricSpec {
                label: "Total Revenue",
                funnel: Funnel::Organic,
                role: Derived,
                aggregation: Sum,
                format: Currency,
                orientation: HigherIsBetter,
                default_goal: "",
            },
            Metric::TotalRoas => MetricSpec {
                label: "Total ROAS",
                funnel: Funnel::Organic,
                role: Derived,
                aggregation: Mean,
                format: Ratio,
                orientation: HigherIsBetter,
                default_goal: "3-5",
            },
        }
    }

    pub fn label(&self) -> &'static str {
        self.spec().label
    }

    pub fn funnel(&self) -> Funnel {
        self.spec().funnel
    }

    pub fn is_manual(&self) -> bool {
        self.spec().role == Role::Manual
    }
}
