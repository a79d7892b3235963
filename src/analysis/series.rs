//! Date-bucketed series for charts and tables.
//!
//! Records whose start date cannot be parsed are left out of every
//! series here; the aggregate totals still count them.

use super::time::parse_start_date;
use crate::models::{Activity, DailyPoint, MonthTotal, WeekTotal, YearTotal};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Distinct four-character year prefixes, newest first.
pub fn available_years(activities: &[Activity]) -> Vec<String> {
    let years: BTreeSet<String> = activities
        .iter()
        .map(|a| a.start_date_local.chars().take(4).collect::<String>())
        .filter(|y| y.len() == 4 && y.chars().all(|c| c.is_ascii_digit()))
        .collect();

    years.into_iter().rev().collect()
}

/// Pushup totals per year, oldest first.
pub fn yearly_totals(activities: &[Activity]) -> Vec<YearTotal> {
    bucket(activities, |dt| format!("{:04}", dt.year()))
        .into_iter()
        .map(|(year, (pushups, count))| YearTotal {
            year,
            pushups,
            count,
        })
        .collect()
}

/// Pushup totals per `YYYY-MM` month, keeping the last `limit` months.
pub fn monthly_totals(activities: &[Activity], limit: usize) -> Vec<MonthTotal> {
    let months: Vec<MonthTotal> = bucket(activities, |dt| dt.format("%Y-%m").to_string())
        .into_iter()
        .map(|(month, (pushups, count))| MonthTotal {
            month,
            pushups,
            count,
        })
        .collect();

    keep_last(months, limit)
}

/// Pushup totals per week starting on Sunday, keeping the last `limit` weeks.
pub fn weekly_totals(activities: &[Activity], limit: usize) -> Vec<WeekTotal> {
    let weeks: Vec<WeekTotal> = bucket(activities, |dt| week_start(dt.date()))
        .into_iter()
        .map(|(week_start, (pushups, count))| WeekTotal {
            week_start,
            pushups,
            count,
        })
        .collect();

    keep_last(weeks, limit)
}

/// One point per record, oldest first, keeping the last `limit` records.
pub fn recent_points(activities: &[Activity], limit: usize) -> Vec<DailyPoint> {
    let mut points: Vec<(NaiveDateTime, u64)> = activities
        .iter()
        .filter_map(|a| dated(a).map(|dt| (dt, a.pushups())))
        .collect();

    points.sort_by_key(|(dt, _)| *dt);

    let points = points
        .into_iter()
        .map(|(dt, pushups)| DailyPoint {
            date: dt.date(),
            pushups,
        })
        .collect();

    keep_last(points, limit)
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

fn bucket<K, F>(activities: &[Activity], key: F) -> BTreeMap<K, (u64, usize)>
where
    K: Ord,
    F: Fn(&NaiveDateTime) -> K,
{
    let mut buckets: BTreeMap<K, (u64, usize)> = BTreeMap::new();

    for activity in activities {
        let Some(dt) = dated(activity) else {
            continue;
        };

        let entry = buckets.entry(key(&dt)).or_default();
        entry.0 += activity.pushups();
        entry.1 += 1;
    }

    buckets
}

fn dated(activity: &Activity) -> Option<NaiveDateTime> {
    let parsed = parse_start_date(&activity.start_date_local);
    if parsed.is_none() {
        warn!(
            "Could not parse date {:?} of activity {}",
            activity.start_date_local, activity.id
        );
    }
    parsed
}

fn keep_last<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    if items.len() > limit {
        items.drain(..items.len() - limit);
    }
    items
}
