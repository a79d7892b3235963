//! Data models for pushup statistics.
//!
//! This module contains the core data structures used throughout
//! the application: activity records as they arrive from the source,
//! the aggregation result, and the report handed to the renderers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an activity record.
///
/// Exports from the running tracker use integers, hand-written
/// files sometimes use strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityId::Number(n) => write!(f, "{}", n),
            ActivityId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A single logged pushup session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier, stable per record.
    #[serde(alias = "run_id")]
    pub id: ActivityId,
    /// Free-text label.
    #[serde(default)]
    pub name: String,
    /// Repetition count. The field keeps its running-tracker name.
    pub distance: f64,
    /// Duration as `H:MM:SS`, `MM:SS` or `SS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moving_time: Option<String>,
    /// Local wall-clock timestamp; the first four characters are the year.
    pub start_date_local: String,
    /// Free-text location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_country: Option<String>,
    /// Average heart rate in bpm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_heartrate: Option<f64>,
}

impl Activity {
    /// Repetition count rounded for display.
    pub fn pushups(&self) -> u64 {
        self.distance.max(0.0).round() as u64
    }

    /// Moving time string, with an absent value read as `"0"`.
    pub fn moving_time_or_zero(&self) -> &str {
        self.moving_time.as_deref().unwrap_or("0")
    }
}

/// Filtered, ordered records plus their summary statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Records surviving all filters, in their final order.
    pub filtered_activities: Vec<Activity>,
    /// Number of filtered records. Shown as the "streak".
    pub total_count: usize,
    /// Sum of `distance`.
    pub sum_distance: f64,
    /// Sum of moving time in seconds.
    pub sum_moving_time: u64,
    /// Mean heart rate, absent values counted as zero.
    pub average_heart_rate: f64,
}

/// Headline numbers for the statistics overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_count: usize,
    pub total_pushups: u64,
    pub max_pushups: u64,
    pub average_pushups: f64,
    pub total_moving_time: u64,
    pub average_heart_rate: f64,
    /// Consecutive days with at least one session, ending today or yesterday.
    pub day_streak: u32,
}

impl Summary {
    /// Builds the overview from an aggregation result.
    pub fn from_result(result: &AggregateResult, day_streak: u32) -> Self {
        let max_pushups = result
            .filtered_activities
            .iter()
            .map(Activity::pushups)
            .max()
            .unwrap_or(0);

        let average_pushups = if result.total_count > 0 {
            result.sum_distance / result.total_count as f64
        } else {
            0.0
        };

        Self {
            total_count: result.total_count,
            total_pushups: result.sum_distance.max(0.0).round() as u64,
            max_pushups,
            average_pushups,
            total_moving_time: result.sum_moving_time,
            average_heart_rate: result.average_heart_rate,
            day_streak,
        }
    }
}

/// Pushup total for one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearTotal {
    pub year: String,
    pub pushups: u64,
    pub count: usize,
}

/// Pushup total for one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTotal {
    pub month: String,
    pub pushups: u64,
    pub count: usize,
}

/// Pushup total for the week starting on `week_start` (a Sunday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekTotal {
    pub week_start: NaiveDate,
    pub pushups: u64,
    pub count: usize,
}

/// One record on the recent-activity line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub pushups: u64,
}

/// Metadata about the generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Where the records were loaded from.
    pub source: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Year filter, or `None` for all years.
    pub year: Option<String>,
    /// Title substring filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Location substring filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Name of the ordering applied.
    pub sort: String,
    /// Number of records loaded from the source.
    pub records_loaded: usize,
    /// Number of records after filtering.
    pub records_matched: usize,
}

/// The complete pushup report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub summary: Summary,
    /// Years present in the loaded records, newest first.
    pub years: Vec<String>,
    /// Most recent sessions, oldest first.
    pub recent: Vec<DailyPoint>,
    pub monthly: Vec<MonthTotal>,
    pub yearly: Vec<YearTotal>,
    pub weekly: Vec<WeekTotal>,
    /// Filtered records in report order.
    pub activities: Vec<Activity>,
}
