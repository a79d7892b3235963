//! Consecutive-day streaks.

use super::time::parse_start_date;
use crate::models::Activity;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

/// Calendar dates of all records with a readable start date.
pub fn activity_dates(activities: &[Activity]) -> Vec<NaiveDate> {
    activities
        .iter()
        .filter_map(|a| parse_start_date(&a.start_date_local))
        .map(|dt| dt.date())
        .collect()
}

/// Number of consecutive days with activity, ending today or yesterday.
///
/// A streak that has not been extended today is still alive as long as
/// yesterday counts.
pub fn calculate_day_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let unique: BTreeSet<NaiveDate> = dates.iter().copied().collect();
    let mut newest_first = unique.into_iter().rev().peekable();

    let yesterday = today - Duration::days(1);
    let newest = newest_first.peek().copied();
    let mut streak = match newest {
        Some(d) if d == today => {
            newest_first.next();
            1
        }
        Some(d) if d == yesterday => 0,
        _ => return 0,
    };

    let mut expected = yesterday;
    for date in newest_first {
        if date != expected {
            break;
        }
        streak += 1;
        expected -= Duration::days(1);
    }

    streak
}
