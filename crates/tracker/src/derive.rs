//! Derivation engine — recomputes every derived metric for a date from the
//! manual entries, in dependency order, then across all recorded dates.
//!
//! A derived value exists for a date only when every input it needs is
//! present and strictly positive. Anything else deletes the entry rather
//! than writing 0, so an incomplete day never shows a misleading rate.

use chrono::NaiveDate;
use launch_core::types::{EmailRecord, Funnel};
use tracing::debug;

use crate::catalog::Metric;
use crate::store::FunnelStore;

/// Full in-memory state for one live launch: both funnel stores, the offer
/// cost, and the email performance log. The sole writer; all mutation goes
/// through [`set_value`](Self::set_value) and friends, each of which leaves
/// every derived metric consistent before returning.
#[derive(Debug, Clone)]
pub struct LaunchTracker {
    pub name: String,
    offer_cost: f64,
    ads: FunnelStore,
    organic: FunnelStore,
    pub emails: Vec<EmailRecord>,
}

impl LaunchTracker {
    pub fn new(name: impl Into<String>, offer_cost: f64) -> Self {
        Self {
            name: name.into(),
            offer_cost,
            ads: FunnelStore::new(Funnel::Ads),
            organic: FunnelStore::new(Funnel::Organic),
            emails: Vec::new(),
        }
    }

    pub fn offer_cost(&self) -> f64 {
        self.offer_cost
    }

    pub fn store(&self, funnel: Funnel) -> &FunnelStore {
        match funnel {
            Funnel::Ads => &self.ads,
            Funnel::Organic => &self.organic,
        }
    }

    fn store_mut(&mut self, funnel: Funnel) -> &mut FunnelStore {
        match funnel {
            Funnel::Ads => &mut self.ads,
            Funnel::Organic => &mut self.organic,
        }
    }

    /// Record a raw form entry and recompute the affected date.
    pub fn set_value(&mut self, metric: Metric, date: NaiveDate, raw: &str) {
        self.store_mut(metric.funnel()).set_value(metric, date, raw);
        self.recompute_date(date);
    }

    /// Store an already-parsed sample and recompute the affected date.
    pub fn record(&mut self, metric: Metric, date: NaiveDate, value: f64) {
        self.store_mut(metric.funnel()).record(metric, date, value);
        self.recompute_date(date);
    }

    pub fn set_goal(&mut self, metric: Metric, goal: &str) {
        self.store_mut(metric.funnel()).set_goal(metric, goal);
    }

    pub fn goal(&self, metric: Metric) -> &str {
        self.store(metric.funnel()).goal(metric)
    }

    pub fn value(&self, metric: Metric, date: NaiveDate) -> Option<f64> {
        self.store(metric.funnel()).value(metric, date)
    }

    pub fn aggregate(&self, metric: Metric) -> f64 {
        self.store(metric.funnel()).aggregate(metric)
    }

    /// Change the offer cost and recompute revenue and ROAS for every
    /// recorded date, since both depend on it.
    pub fn set_offer_cost(&mut self, offer_cost: f64) {
        self.offer_cost = offer_cost;
        debug!(offer_cost, "offer cost changed, recomputing revenue metrics");
        self.recompute_all();
    }

    /// Recompute every derived metric for one date, both funnels, in
    /// dependency order. Idempotent: a second run over unchanged manual
    /// entries writes identical values.
    pub fn recompute_date(&mut self, date: NaiveDate) {
        self.derive_ads(date);
        self.derive_organic(date);
    }

    /// Recompute every date that has at least one manual entry.
    pub fn recompute_all(&mut self) {
        let mut dates = self.ads.recorded_dates();
        dates.extend(self.organic.recorded_dates());
        for date in dates {
            self.recompute_date(date);
        }
    }

    fn derive_ads(&mut self, date: NaiveDate) {
        let spend = input(&self.ads, Metric::AdSpend, date);
        let views = input(&self.ads, Metric::AdLandingPageViews, date);
        let regs = input(&self.ads, Metric::AdRegistrations, date);

        apply(
            &mut self.ads,
            Metric::CostPerLandingPageView,
            date,
            ratio(spend, views),
        );
        apply(
            &mut self.ads,
            Metric::AdPageConversionRate,
            date,
            ratio(regs, views).map(|r| r * 100.0),
        );
        apply(
            &mut self.ads,
            Metric::CostPerRegistration,
            date,
            ratio(spend, regs),
        );
    }

    fn derive_organic(&mut self, date: NaiveDate) {
        let views = input(&self.organic, Metric::OrganicLandingPageViews, date);
        let regs = input(&self.organic, Metric::OrganicRegistrations, date);
        let sales_views = input(&self.organic, Metric::SalesPageViews, date);
        let sales = input(&self.organic, Metric::TotalSales, date);
        // Cross-funnel read: ROAS divides by the ads funnel's spend for
        // the same date.
        let ad_spend = input(&self.ads, Metric::AdSpend, date);

        apply(
            &mut self.organic,
            Metric::OrganicPageConversionRate,
            date,
            ratio(regs, views).map(|r| r * 100.0),
        );
        apply(
            &mut self.organic,
            Metric::SalesPageConversion,
            date,
            ratio(sales, sales_views).map(|r| r * 100.0),
        );

        let offer_cost = positive(self.offer_cost);
        let revenue = match (sales, offer_cost) {
            (Some(s), Some(c)) => Some(s * c),
            _ => None,
        };
        apply(&mut self.organic, Metric::TotalRevenue, date, revenue);

        // Revenue must be settled before ROAS reads it.
        apply(
            &mut self.organic,
            Metric::TotalRoas,
            date,
            ratio(revenue, ad_spend),
        );
    }
}

/// A manual input counts only when it is present and strictly positive;
/// a recorded 0 behaves like "no data" for derivation purposes.
fn input(store: &FunnelStore, metric: Metric, date: NaiveDate) -> Option<f64> {
    store.value(metric, date).and_then(positive)
}

fn positive(v: f64) -> Option<f64> {
    (v > 0.0).then_some(v)
}

fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) => Some(n / d),
        _ => None,
    }
}

/// Write a derived value, or delete the entry when the computation was
/// undefined for this date.
fn apply(store: &mut FunnelStore, metric: Metric, date: NaiveDate, value: Option<f64>) {
    match value {
        Some(v) => store.record(metric, date, v),
        None => store.clear(metric, date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn tracker() -> LaunchTracker {
        LaunchTracker::new("August Launch", 100.0)
    }

    #[test]
    fn test_ads_derivation() {
        let mut t = tracker();
        let d = date("2026-08-01");
        t.set_value(Metric::AdSpend, d, "100");
        t.set_value(Metric::AdLandingPageViews, d, "50");
        t.set_value(Metric::AdRegistrations, d, "10");

        assert_eq!(t.value(Metric::CostPerLandingPageView, d), Some(2.0));
        assert_eq!(t.value(Metric::AdPageConversionRate, d), Some(20.0));
        assert_eq!(t.value(Metric::CostPerRegistration, d), Some(10.0));
    }

    #[test]
    fn test_zero_registrations_deletes_dependents() {
        let mut t = tracker();
        let d = date("2026-08-01");
        t.set_value(Metric::AdSpend, d, "100");
        t.set_value(Metric::AdLandingPageViews, d, "50");
        t.set_value(Metric::AdRegistrations, d, "10");
        t.set_value(Metric::AdRegistrations, d, "0");

        // Not zero, gone: a 0 input makes the rate and cost undefined.
        assert_eq!(t.value(Metric::AdPageConversionRate, d), None);
        assert_eq!(t.value(Metric::CostPerRegistration, d), None);
        // Spend/views derivation is untouched.
        assert_eq!(t.value(Metric::CostPerLandingPageView, d), Some(2.0));
    }

    #[test]
    fn test_revenue_and_roas() {
        let mut t = tracker();
        let d = date("2026-08-01");
        t.set_value(Metric::TotalSales, d, "5");
        t.set_value(Metric::AdSpend, d, "200");

        assert_eq!(t.value(Metric::TotalRevenue, d), Some(500.0));
        assert_eq!(t.value(Metric::TotalRoas, d), Some(2.5));
    }

    #[test]
    fn test_zero_spend_removes_roas_but_keeps_revenue() {
        let mut t = tracker();
        let d = date("2026-08-01");
        t.set_value(Metric::TotalSales, d, "5");
        t.set_value(Metric::AdSpend, d, "200");
        t.set_value(Metric::AdSpend, d, "0");

        assert_eq!(t.value(Metric::TotalRoas, d), None);
        assert_eq!(t.value(Metric::TotalRevenue, d), Some(500.0));
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let mut t = tracker();
        let d = date("2026-08-01");
        t.set_value(Metric::AdSpend, d, "150");
        t.set_value(Metric::AdLandingPageViews, d, "60");
        t.set_value(Metric::AdRegistrations, d, "12");

        let first: Vec<Option<f64>> = Metric::ADS.iter().map(|m| t.value(*m, d)).collect();
        t.recompute_date(d);
        let second: Vec<Option<f64>> = Metric::ADS.iter().map(|m| t.value(*m, d)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_offer_cost_change_recomputes_all_dates() {
        let mut t = tracker();
        let d1 = date("2026-08-01");
        let d2 = date("2026-08-02");
        t.set_value(Metric::TotalSales, d1, "5");
        t.set_value(Metric::TotalSales, d2, "3");

        t.set_offer_cost(200.0);
        assert_eq!(t.value(Metric::TotalRevenue, d1), Some(1000.0));
        assert_eq!(t.value(Metric::TotalRevenue, d2), Some(600.0));
    }

    #[test]
    fn test_aggregates_follow_derivation() {
        let mut t = tracker();
        t.set_value(Metric::AdSpend, date("2026-08-01"), "100");
        t.set_value(Metric::AdLandingPageViews, date("2026-08-01"), "50");
        t.set_value(Metric::AdSpend, date("2026-08-02"), "100");
        t.set_value(Metric::AdLandingPageViews, date("2026-08-02"), "25");

        // Sum for spend, mean for the derived cost ($2 and $4 per view).
        assert_eq!(t.aggregate(Metric::AdSpend), 200.0);
        assert_eq!(t.aggregate(Metric::CostPerLandingPageView), 3.0);
    }
}
