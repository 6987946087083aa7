// src/analytics.rs
//! Derived stock analytics for a single product's snapshot window.
//!
//! Recomputed on every snapshot-set change; never cached independently of
//! its source list.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use serde::Serialize;

use crate::models::inventory::StockSnapshot;

/// Date window for snapshot queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    Days7,
    #[default]
    Days30,
    Days90,
    Year1,
}

impl TimeRange {
    pub fn days(&self) -> i64 {
        match self {
            TimeRange::Days7 => 7,
            TimeRange::Days30 => 30,
            TimeRange::Days90 => 90,
            TimeRange::Year1 => 365,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Days7 => "7d",
            TimeRange::Days30 => "30d",
            TimeRange::Days90 => "90d",
            TimeRange::Year1 => "1y",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "7d" => Some(TimeRange::Days7),
            "30d" => Some(TimeRange::Days30),
            "90d" => Some(TimeRange::Days90),
            "1y" => Some(TimeRange::Year1),
            _ => None,
        }
    }

    /// Lower bound of the window, counting back from `now`.
    pub fn date_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.days())
    }
}

/// One day-bucket of the chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub quantity: u64,
    pub formatted_date: String,
}

/// Derived metrics over one product's snapshot window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAnalytics {
    pub total_snapshots: usize,
    pub avg_quantity: f64,
    pub avg_value: f64,
    pub quantity_trend_pct: f64,
    pub value_trend_pct: f64,
    pub min_quantity: u32,
    pub max_quantity: u32,
    pub min_value: f64,
    pub max_value: f64,
    pub chart_series: Vec<ChartPoint>,
}

impl StockAnalytics {
    /// The canonical "no data" state: all zeros, empty series.
    pub fn zero() -> Self {
        Self {
            total_snapshots: 0,
            avg_quantity: 0.0,
            avg_value: 0.0,
            quantity_trend_pct: 0.0,
            value_trend_pct: 0.0,
            min_quantity: 0,
            max_quantity: 0,
            min_value: 0.0,
            max_value: 0.0,
            chart_series: Vec::new(),
        }
    }

    /// Compute analytics over a possibly-unsorted snapshot list.
    ///
    /// Trend compares the second-half mean against the first-half mean of
    /// the chronologically sorted list, split at `floor(n/2)`. A zero
    /// baseline reports a 0% trend rather than letting Infinity or NaN
    /// reach the caller.
    pub fn compute(snapshots: &[StockSnapshot]) -> Self {
        if snapshots.is_empty() {
            return Self::zero();
        }

        let mut ordered: Vec<&StockSnapshot> = snapshots.iter().collect();
        ordered.sort_by_key(|s| s.timestamp);

        let total = ordered.len();
        let quantities: Vec<f64> = ordered.iter().map(|s| s.quantity as f64).collect();
        let values: Vec<f64> = ordered.iter().map(|s| s.value).collect();

        let midpoint = total / 2;
        Self {
            total_snapshots: total,
            avg_quantity: round2(mean(&quantities)),
            avg_value: round2(mean(&values)),
            quantity_trend_pct: trend_pct(&quantities, midpoint),
            value_trend_pct: trend_pct(&values, midpoint),
            min_quantity: ordered.iter().map(|s| s.quantity).min().unwrap_or(0),
            max_quantity: ordered.iter().map(|s| s.quantity).max().unwrap_or(0),
            min_value: values.iter().copied().fold(f64::INFINITY, f64::min),
            max_value: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            chart_series: chart_series(&ordered),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn trend_pct(values: &[f64], midpoint: usize) -> f64 {
    let first_half_avg = mean(&values[..midpoint]);
    let second_half_avg = mean(&values[midpoint..]);
    if first_half_avg == 0.0 {
        return 0.0;
    }
    round2((second_half_avg - first_half_avg) / first_half_avg * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One point per calendar day. Snapshots sharing a local calendar date are
/// summed into a single bucket, not averaged; two snapshots 23 hours apart
/// that cross midnight land in different buckets.
fn chart_series(ordered: &[&StockSnapshot]) -> Vec<ChartPoint> {
    let mut series: Vec<ChartPoint> = Vec::new();
    for snapshot in ordered {
        let date = snapshot.timestamp.with_timezone(&Local).date_naive();
        match series.last_mut() {
            Some(point) if point.date == date => point.quantity += snapshot.quantity as u64,
            _ => series.push(ChartPoint {
                date,
                quantity: snapshot.quantity as u64,
                formatted_date: date.format("%b %d").to_string(),
            }),
        }
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn snapshot(id: u32, quantity: u32, value: f64, day: u32, minute: u32) -> StockSnapshot {
        // midday timestamps so local-date bucketing is stable across zones
        StockSnapshot {
            id: id.to_string(),
            product_id: "p1".to_string(),
            quantity,
            value,
            timestamp: Utc.with_ymd_and_hms(2025, 6, day, 12, minute, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_list_yields_zero_state() {
        let analytics = StockAnalytics::compute(&[]);
        assert_eq!(analytics, StockAnalytics::zero());
        assert!(analytics.chart_series.is_empty());
    }

    #[test]
    fn test_flat_quantities_have_zero_trend() {
        // 14 snapshots, all quantity 100
        let snapshots: Vec<_> = (1..=14)
            .map(|day| snapshot(day, 100, 50.0, day, 12))
            .collect();
        let analytics = StockAnalytics::compute(&snapshots);
        assert_eq!(analytics.total_snapshots, 14);
        assert_eq!(analytics.quantity_trend_pct, 0.0);
        assert_eq!(analytics.avg_quantity, 100.0);
        assert_eq!(analytics.min_quantity, 100);
        assert_eq!(analytics.max_quantity, 100);
    }

    #[test]
    fn test_trend_compares_half_averages() {
        // first half [10, 10], second half [20, 20] -> +100%
        let snapshots = vec![
            snapshot(1, 10, 1.0, 1, 12),
            snapshot(2, 10, 2.0, 2, 12),
            snapshot(3, 20, 4.0, 3, 12),
            snapshot(4, 20, 5.0, 4, 12),
        ];
        let analytics = StockAnalytics::compute(&snapshots);
        assert_eq!(analytics.quantity_trend_pct, 100.0);
        // value halves: avg 1.5 -> 4.5 = +200%
        assert_eq!(analytics.value_trend_pct, 200.0);
    }

    #[test]
    fn test_trend_ignores_input_order() {
        let snapshots = vec![
            snapshot(3, 20, 4.0, 3, 12),
            snapshot(1, 10, 1.0, 1, 12),
            snapshot(4, 20, 5.0, 4, 12),
            snapshot(2, 10, 2.0, 2, 12),
        ];
        assert_eq!(StockAnalytics::compute(&snapshots).quantity_trend_pct, 100.0);
    }

    #[test]
    fn test_zero_baseline_clamps_trend() {
        let snapshots = vec![
            snapshot(1, 0, 0.0, 1, 12),
            snapshot(2, 0, 0.0, 2, 12),
            snapshot(3, 50, 10.0, 3, 12),
            snapshot(4, 50, 10.0, 4, 12),
        ];
        let analytics = StockAnalytics::compute(&snapshots);
        assert_eq!(analytics.quantity_trend_pct, 0.0);
        assert_eq!(analytics.value_trend_pct, 0.0);
        assert!(analytics.quantity_trend_pct.is_finite());
    }

    #[test]
    fn test_single_snapshot_has_zero_trend() {
        // midpoint 0 leaves the first half empty; trend must stay 0
        let analytics = StockAnalytics::compute(&[snapshot(1, 5, 2.5, 1, 12)]);
        assert_eq!(analytics.quantity_trend_pct, 0.0);
        assert_eq!(analytics.avg_quantity, 5.0);
    }

    #[test]
    fn test_averages_round_to_two_decimals() {
        let snapshots = vec![
            snapshot(1, 1, 1.0, 1, 12),
            snapshot(2, 2, 1.0, 2, 12),
            snapshot(3, 2, 1.0, 3, 12),
        ];
        // mean quantity = 5/3 = 1.666... -> 1.67
        assert_eq!(StockAnalytics::compute(&snapshots).avg_quantity, 1.67);
    }

    #[test]
    fn test_same_day_snapshots_sum_into_one_bucket() {
        let snapshots = vec![
            snapshot(1, 10, 1.0, 5, 0),
            snapshot(2, 15, 1.0, 5, 30),
            snapshot(3, 7, 1.0, 6, 0),
        ];
        let series = StockAnalytics::compute(&snapshots).chart_series;
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].quantity, 25);
        assert_eq!(series[1].quantity, 7);
        assert!(!series[0].formatted_date.is_empty());
    }

    #[test]
    fn test_extrema_over_full_set() {
        let snapshots = vec![
            snapshot(1, 3, 9.5, 1, 12),
            snapshot(2, 30, 0.5, 2, 12),
            snapshot(3, 12, 4.0, 3, 12),
        ];
        let analytics = StockAnalytics::compute(&snapshots);
        assert_eq!(analytics.min_quantity, 3);
        assert_eq!(analytics.max_quantity, 30);
        assert_eq!(analytics.min_value, 0.5);
        assert_eq!(analytics.max_value, 9.5);
    }

    #[test]
    fn test_time_range_round_trip_and_window() {
        for range in [
            TimeRange::Days7,
            TimeRange::Days30,
            TimeRange::Days90,
            TimeRange::Year1,
        ] {
            assert_eq!(TimeRange::parse(range.as_str()), Some(range));
        }
        assert_eq!(TimeRange::parse("2w"), None);

        let now = Utc.with_ymd_and_hms(2025, 6, 30, 0, 0, 0).unwrap();
        assert_eq!(
            TimeRange::Days7.date_from(now),
            Utc.with_ymd_and_hms(2025, 6, 23, 0, 0, 0).unwrap()
        );
    }
}
