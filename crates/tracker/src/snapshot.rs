//! Snapshot boundary object — the serializable shape the persistence layer
//! stores and the console loads. Only manual entries are trusted on load;
//! derived metrics are recomputed from scratch so a stale or hand-edited
//! file can never smuggle in inconsistent rates.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use launch_core::types::EmailRecord;
use launch_core::{LaunchError, LaunchResult};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::Metric;
use crate::derive::LaunchTracker;

/// Goal and per-date values for one metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricEntry {
    pub metric: Metric,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub values: BTreeMap<NaiveDate, f64>,
}

/// Complete serializable state of one launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchSnapshot {
    pub name: String,
    pub offer_cost: f64,
    pub metrics: Vec<MetricEntry>,
    #[serde(default)]
    pub emails: Vec<EmailRecord>,
}

impl LaunchSnapshot {
    pub fn from_json(json: &str) -> LaunchResult<Self> {
        let snapshot: LaunchSnapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_json(&self) -> LaunchResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> LaunchResult<()> {
        if !self.offer_cost.is_finite() || self.offer_cost < 0.0 {
            return Err(LaunchError::Snapshot(format!(
                "offer cost must be a non-negative number, got {}",
                self.offer_cost
            )));
        }
        for entry in &self.metrics {
            for (date, value) in &entry.values {
                if !value.is_finite() || *value < 0.0 {
                    return Err(LaunchError::Snapshot(format!(
                        "{:?} has invalid value {} on {}",
                        entry.metric, value, date
                    )));
                }
            }
        }
        Ok(())
    }

    /// Capture the current tracker state, including derived values so the
    /// exported file is complete for downstream consumers.
    pub fn from_tracker(tracker: &LaunchTracker) -> Self {
        let mut metrics = Vec::new();
        for metric in Metric::ADS.iter().chain(Metric::ORGANIC.iter()) {
            let store = tracker.store(metric.funnel());
            let series = store.series(*metric);
            metrics.push(MetricEntry {
                metric: *metric,
                goal: store.goal(*metric).to_string(),
                values: series.map(|s| s.values.clone()).unwrap_or_default(),
            });
        }
        Self {
            name: tracker.name.clone(),
            offer_cost: tracker.offer_cost(),
            metrics,
            emails: tracker.emails.clone(),
        }
    }
}

impl LaunchTracker {
    /// Rebuild a tracker from a snapshot: replay goals and manual entries,
    /// then run a full recomputation. Derived values in the file are
    /// ignored.
    pub fn from_snapshot(snapshot: &LaunchSnapshot) -> Self {
        let mut tracker = LaunchTracker::new(snapshot.name.clone(), snapshot.offer_cost);
        for entry in &snapshot.metrics {
            if !entry.goal.is_empty() {
                tracker.set_goal(entry.metric, &entry.goal);
            }
            if entry.metric.is_manual() {
                for (date, value) in &entry.values {
                    tracker.record(entry.metric, *date, *value);
                }
            }
        }
        tracker.emails = snapshot.emails.clone();
        tracker.recompute_all();
        info!(
            launch = %tracker.name,
            metrics = snapshot.metrics.len(),
            emails = snapshot.emails.len(),
            "snapshot loaded"
        );
        tracker
    }
}
