//! Sparse per-date sample storage for one funnel's metrics.
//!
//! Absent dates mean "no data," never zero: means skip them, sums treat
//! them as contributing nothing. The store holds raw user entries and the
//! values the derivation engine writes back; it does no I/O of its own.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use launch_core::types::Funnel;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{Aggregation, Metric};

/// One metric's goal string and date-keyed samples.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricSeries {
    pub goal: String,
    pub values: BTreeMap<NaiveDate, f64>,
}

/// Per-date samples for every metric of one funnel.
#[derive(Debug, Clone)]
pub struct FunnelStore {
    funnel: Funnel,
    series: HashMap<Metric, MetricSeries>,
}

impl FunnelStore {
    /// Create an empty store seeded with each metric's default goal.
    pub fn new(funnel: Funnel) -> Self {
        let series = Metric::for_funnel(funnel)
            .iter()
            .map(|m| {
                (
                    *m,
                    MetricSeries {
                        goal: m.spec().default_goal.to_string(),
                        values: BTreeMap::new(),
                    },
                )
            })
            .collect();
        Self { funnel, series }
    }

    pub fn funnel(&self) -> Funnel {
        self.funnel
    }

    /// Record a raw form-field entry for a metric on a date.
    ///
    /// An empty string deletes the entry (explicit "no data"). Text that
    /// fails to parse as a number is coerced to 0, matching the observed
    /// form behavior; a warning is logged so the coercion is visible.
    pub fn set_value(&mut self, metric: Metric, date: NaiveDate, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.clear(metric, date);
            return;
        }
        let value = match trimmed.parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                warn!(metric = ?metric, %date, input = trimmed, "non-numeric entry coerced to 0");
                0.0
            }
        };
        self.record(metric, date, value);
    }

    /// Store an already-parsed sample.
    pub fn record(&mut self, metric: Metric, date: NaiveDate, value: f64) {
        if let Some(series) = self.series.get_mut(&metric) {
            series.values.insert(date, value);
        }
    }

    /// Remove the sample for a metric on a date, if any.
    pub fn clear(&mut self, metric: Metric, date: NaiveDate) {
        if let Some(series) = self.series.get_mut(&metric) {
            series.values.remove(&date);
        }
    }

    pub fn value(&self, metric: Metric, date: NaiveDate) -> Option<f64> {
        self.series.get(&metric).and_then(|s| s.values.get(&date)).copied()
    }

    pub fn goal(&self, metric: Metric) -> &str {
        self.series.get(&metric).map(|s| s.goal.as_str()).unwrap_or("")
    }

    pub fn set_goal(&mut self, metric: Metric, goal: &str) {
        if let Some(series) = self.series.get_mut(&metric) {
            series.goal = goal.trim().to_string();
        }
    }

    pub fn series(&self, metric: Metric) -> Option<&MetricSeries> {
        self.series.get(&metric)
    }

    /// All-time summary of a metric: sum for counts and currency totals,
    /// arithmetic mean over recorded dates for everything else. Returns 0
    /// when no values are recorded.
    pub fn aggregate(&self, metric: Metric) -> f64 {
        let Some(series) = self.series.get(&metric) else {
            return 0.0;
        };
        if series.values.is_empty() {
            return 0.0;
        }
        let sum: f64 = series.values.values().sum();
        match metric.spec().aggregation {
            Aggregation::Sum => sum,
            Aggregation::Mean => sum / series.values.len() as f64,
        }
    }

    /// Every date with at least one manual entry in this store.
    pub fn recorded_dates(&self) -> BTreeSet<NaiveDate> {
        let mut dates = BTreeSet::new();
        for (metric, series) in &self.series {
            if metric.is_manual() {
                dates.extend(series.values.keys().copied());
            }
        }
        dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_store_aggregates_to_zero() {
        let store = FunnelStore::new(Funnel::Ads);
        assert_eq!(store.aggregate(Metric::AdSpend), 0.0);
    }

    #[test]
    fn test_sum_aggregation() {
        let mut store = FunnelStore::new(Funnel::Ads);
        store.set_value(Metric::AdSpend, date("2026-08-01"), "100");
        store.set_value(Metric::AdSpend, date("2026-08-03"), "250.5");
        assert_eq!(store.aggregate(Metric::AdSpend), 350.5);
    }

    #[test]
    fn test_mean_aggregation_skips_missing_dates() {
        let mut store = FunnelStore::new(Funnel::Ads);
        // Two recorded days with a gap between them; the gap must not
        // drag the mean down as a phantom zero.
        store.set_value(Metric::AdClickThroughRate, date("2026-08-01"), "2.0");
        store.set_value(Metric::AdClickThroughRate, date("2026-08-05"), "4.0");
        assert_eq!(store.aggregate(Metric::AdClickThroughRate), 3.0);
    }

    #[test]
    fn test_empty_string_deletes_entry() {
        let mut store = FunnelStore::new(Funnel::Ads);
        store.set_value(Metric::AdSpend, date("2026-08-01"), "100");
        store.set_value(Metric::AdSpend, date("2026-08-01"), "");
        assert_eq!(store.value(Metric::AdSpend, date("2026-08-01")), None);
        assert_eq!(store.aggregate(Metric::AdSpend), 0.0);
    }

    #[test]
    fn test_invalid_input_coerces_to_zero() {
        let mut store = FunnelStore::new(Funnel::Ads);
        store.set_value(Metric::AdSpend, date("2026-08-01"), "abc");
        assert_eq!(store.value(Metric::AdSpend, date("2026-08-01")), Some(0.0));
    }

    #[test]
    fn test_foreign_metric_is_ignored() {
        let mut store = FunnelStore::new(Funnel::Ads);
        store.set_value(Metric::TotalSales, date("2026-08-01"), "5");
        assert_eq!(store.value(Metric::TotalSales, date("2026-08-01")), None);
    }

    #[test]
    fn test_recorded_dates_covers_manual_metrics_only() {
        let mut store = FunnelStore::new(Funnel::Ads);
        store.set_value(Metric::AdSpend, date("2026-08-01"), "100");
        store.record(Metric::CostPerRegistration, date("2026-08-02"), 5.0);
        let dates = store.recorded_dates();
        assert!(dates.contains(&date("2026-08-01")));
        assert!(!dates.contains(&date("2026-08-02")));
    }
}
