//! Statistics over the run history.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::metrics::pace::round_to;
use crate::recording::types::RunLog;

/// Number of runs shown in the recent trend chart.
pub const TREND_LENGTH: usize = 7;

/// Lifetime totals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryTotals {
    /// Number of logged runs
    pub run_count: usize,
    /// Kilometres
    pub distance_km: f64,
    /// Seconds
    pub duration_sec: u64,
}

impl HistoryTotals {
    /// Compute totals over all logs.
    pub fn from_logs(logs: &[RunLog]) -> Self {
        logs.iter().fold(Self::default(), |acc, log| Self {
            run_count: acc.run_count + 1,
            distance_km: acc.distance_km + log.distance_km,
            duration_sec: acc.duration_sec + log.duration_sec as u64,
        })
    }

    /// Total time in hours, one decimal.
    pub fn duration_hours(&self) -> f64 {
        round_to(self.duration_sec as f64 / 3600.0, 1)
    }
}

/// One bar of the recent trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Calendar date of the run (UTC)
    pub date: NaiveDate,
    /// Kilometres
    pub distance_km: f64,
}

/// The most recent runs, oldest first.
pub fn recent_trend(logs: &[RunLog], count: usize) -> Vec<TrendPoint> {
    let mut sorted: Vec<&RunLog> = logs.iter().collect();
    sorted.sort_by_key(|log| log.date);

    let skip = sorted.len().saturating_sub(count);
    sorted
        .into_iter()
        .skip(skip)
        .map(|log| TrendPoint {
            date: log.date.date_naive(),
            distance_km: log.distance_km,
        })
        .collect()
}

/// Distance of runs dated less than `days` before `now`.
pub fn distance_within(logs: &[RunLog], now: DateTime<Utc>, days: u32) -> f64 {
    let window = Duration::days(days as i64);
    logs.iter()
        .filter(|log| now - log.date < window)
        .map(|log| log.distance_km)
        .sum()
}

/// Logs sorted newest first.
pub fn newest_first(logs: &[RunLog]) -> Vec<&RunLog> {
    let mut sorted: Vec<&RunLog> = logs.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}
