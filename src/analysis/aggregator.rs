//! Activity filtering, ordering and aggregation.
//!
//! This module provides the filter predicates, the stock orderings and
//! [`aggregate`], which chains them into one pass and computes the
//! summary statistics of the surviving records.

use super::time::{parse_moving_time, parse_start_date};
use crate::models::{Activity, AggregateResult};
use std::cmp::Reverse;
use std::fmt;

/// Predicate deciding whether a record matches a comparison value.
pub type FilterFn = fn(&Activity, &str) -> bool;

/// Ordering transform applied to the filtered records.
pub type SortFn = fn(Vec<Activity>) -> Vec<Activity>;

/// Either a title filter or a replacement ordering.
#[derive(Clone)]
pub enum SortOrTitle {
    /// Keep records whose name contains the string.
    Title(String),
    /// Reorder the filtered records with this transform.
    Sort(SortFn),
}

impl fmt::Debug for SortOrTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrTitle::Title(title) => f.debug_tuple("Title").field(title).finish(),
            SortOrTitle::Sort(_) => f.write_str("Sort(..)"),
        }
    }
}

/// True when the first four characters of the start date equal `year`.
pub fn filter_by_year(activity: &Activity, year: &str) -> bool {
    activity.start_date_local.chars().take(4).eq(year.chars())
}

/// True when the name contains `title`. An empty name never matches.
pub fn filter_by_title(activity: &Activity, title: &str) -> bool {
    !activity.name.is_empty() && activity.name.contains(title)
}

/// True when the location contains `location`. A missing location never matches.
pub fn filter_by_location(activity: &Activity, location: &str) -> bool {
    match activity.location_country.as_deref() {
        Some(country) if !country.is_empty() => country.contains(location),
        _ => false,
    }
}

/// Newest first. Records with an unreadable date go last.
pub fn sort_by_date_desc(mut activities: Vec<Activity>) -> Vec<Activity> {
    // None orders below every date, so reversing puts it last.
    activities.sort_by_cached_key(|a| Reverse(parse_start_date(&a.start_date_local)));
    activities
}

/// Oldest first. Records with an unreadable date go last.
pub fn sort_by_date_asc(mut activities: Vec<Activity>) -> Vec<Activity> {
    activities.sort_by_cached_key(|a| {
        let date = parse_start_date(&a.start_date_local);
        (date.is_none(), date)
    });
    activities
}

/// Largest repetition count first.
pub fn sort_by_distance_desc(mut activities: Vec<Activity>) -> Vec<Activity> {
    activities.sort_by(|a, b| b.distance.total_cmp(&a.distance));
    activities
}

/// Filter, order and summarize a collection of activities.
///
/// Steps run in a fixed order: the predicate, the title filter, the
/// location filter, then the ordering. Without a sort transform the
/// records come back newest first.
pub fn aggregate(
    activities: &[Activity],
    filter: Option<FilterFn>,
    filter_value: &str,
    sort_or_title: Option<&SortOrTitle>,
    location: Option<&str>,
) -> AggregateResult {
    let mut filtered: Vec<Activity> = match filter {
        Some(predicate) => activities
            .iter()
            .filter(|a| predicate(a, filter_value))
            .cloned()
            .collect(),
        None => activities.to_vec(),
    };

    if let Some(SortOrTitle::Title(title)) = sort_or_title {
        filtered.retain(|a| filter_by_title(a, title));
    }

    if let Some(location) = location.filter(|l| !l.is_empty()) {
        filtered.retain(|a| filter_by_location(a, location));
    }

    let filtered = match sort_or_title {
        Some(SortOrTitle::Sort(sort)) => sort(filtered),
        _ => sort_by_date_desc(filtered),
    };

    summarize(filtered)
}

/// Compute the aggregate statistics of already-filtered records.
fn summarize(filtered: Vec<Activity>) -> AggregateResult {
    let total_count = filtered.len();
    let sum_distance = filtered.iter().fold(0.0, |acc, a| acc + a.distance);
    let sum_moving_time: u64 = filtered
        .iter()
        .map(|a| parse_moving_time(a.moving_time_or_zero()))
        .fold(0u64, u64::saturating_add);

    let average_heart_rate = if total_count > 0 {
        let total = filtered
            .iter()
            .fold(0.0, |acc, a| acc + a.average_heartrate.unwrap_or(0.0));
        total / total_count as f64
    } else {
        0.0
    };

    AggregateResult {
        filtered_activities: filtered,
        total_count,
        sum_distance,
        sum_moving_time,
        average_heart_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityId;

    fn create_test_activity(id: i64, date: &str, distance: f64) -> Activity {
        Activity {
            id: ActivityId::Number(id),
            name: "Pushups".to_string(),
            distance,
            moving_time: Some("1:00".to_string()),
            start_date_local: date.to_string(),
            location_country: None,
            average_heartrate: None,
        }
    }

    fn ids(result: &AggregateResult) -> Vec<ActivityId> {
        result
            .filtered_activities
            .iter()
            .map(|a| a.id.clone())
            .collect()
    }

    #[test]
    fn test_filter_by_year_exact_prefix() {
        let a = create_test_activity(1, "2023-05-01T10:00:00", 10.0);
        let b = create_test_activity(2, "2024-05-01T10:00:00", 10.0);

        assert!(filter_by_year(&a, "2023"));
        assert!(!filter_by_year(&b, "2023"));
        assert!(!filter_by_year(&a, "20"));
        assert!(!filter_by_year(&b, "20"));
    }

    #[test]
    fn test_default_ordering_is_newest_first() {
        let activities = vec![
            create_test_activity(1, "2024-01-01T08:00:00", 10.0),
            create_test_activity(2, "2024-03-01T08:00:00", 10.0),
            create_test_activity(3, "2024-02-01T08:00:00", 10.0),
        ];

        let result = aggregate(&activities, None, "", None, None);

        assert_eq!(
            ids(&result),
            vec![
                ActivityId::Number(2),
                ActivityId::Number(3),
                ActivityId::Number(1)
            ]
        );
    }

    #[test]
    fn test_unparseable_dates_sort_last_in_input_order() {
        let activities = vec![
            create_test_activity(1, "garbage", 10.0),
            create_test_activity(2, "2024-01-01", 10.0),
            create_test_activity(3, "also garbage", 10.0),
            create_test_activity(4, "2024-06-01", 10.0),
        ];

        let desc = aggregate(&activities, None, "", None, None);
        assert_eq!(
            ids(&desc),
            vec![
                ActivityId::Number(4),
                ActivityId::Number(2),
                ActivityId::Number(1),
                ActivityId::Number(3)
            ]
        );

        let sort = SortOrTitle::Sort(sort_by_date_asc);
        let asc = aggregate(&activities, None, "", Some(&sort), None);
        assert_eq!(
            ids(&asc),
            vec![
                ActivityId::Number(2),
                ActivityId::Number(4),
                ActivityId::Number(1),
                ActivityId::Number(3)
            ]
        );
    }

    #[test]
    fn test_sort_transform_replaces_default() {
        let activities = vec![
            create_test_activity(1, "2024-01-01", 30.0),
            create_test_activity(2, "2024-03-01", 10.0),
            create_test_activity(3, "2024-02-01", 50.0),
        ];

        let sort = SortOrTitle::Sort(sort_by_distance_desc);
        let result = aggregate(&activities, None, "", Some(&sort), None);

        assert_eq!(
            ids(&result),
            vec![
                ActivityId::Number(3),
                ActivityId::Number(1),
                ActivityId::Number(2)
            ]
        );
    }

    #[test]
    fn test_title_filter_is_case_sensitive_substring() {
        let mut morning = create_test_activity(1, "2024-01-01", 10.0);
        morning.name = "Morning Pushups".to_string();
        let mut evening = create_test_activity(2, "2024-01-02", 10.0);
        evening.name = "evening pushups".to_string();
        let mut unnamed = create_test_activity(3, "2024-01-03", 10.0);
        unnamed.name = String::new();

        let activities = vec![morning, evening, unnamed];

        let title = SortOrTitle::Title("Pushups".to_string());
        let result = aggregate(&activities, None, "", Some(&title), None);
        assert_eq!(ids(&result), vec![ActivityId::Number(1)]);

        let empty = SortOrTitle::Title(String::new());
        let result = aggregate(&activities, None, "", Some(&empty), None);
        assert_eq!(result.total_count, 2);
    }

    #[test]
    fn test_location_filter_excludes_missing() {
        let mut home = create_test_activity(1, "2024-01-01", 10.0);
        home.location_country = Some("Berlin, Germany".to_string());
        let mut away = create_test_activity(2, "2024-01-02", 10.0);
        away.location_country = Some("Paris, France".to_string());
        let nowhere = create_test_activity(3, "2024-01-03", 10.0);

        let activities = vec![home, away, nowhere];

        let result = aggregate(&activities, None, "", None, Some("Germany"));
        assert_eq!(ids(&result), vec![ActivityId::Number(1)]);

        let result = aggregate(&activities, None, "", None, Some("germany"));
        assert!(result.filtered_activities.is_empty());

        let result = aggregate(&activities, None, "", None, Some(""));
        assert_eq!(result.total_count, 3);
    }

    #[test]
    fn test_filters_combine_and_conserve_records() {
        let mut a = create_test_activity(1, "2023-12-31T23:00:00", 10.0);
        a.location_country = Some("Tokyo".to_string());
        let mut b = create_test_activity(2, "2024-01-01T09:00:00", 20.0);
        b.location_country = Some("Tokyo".to_string());
        let mut c = create_test_activity(3, "2024-02-01T09:00:00", 30.0);
        c.location_country = Some("Osaka".to_string());
        let mut d = create_test_activity(4, "2024-03-01T09:00:00", 40.0);
        d.name = "Night Pushups".to_string();
        d.location_country = Some("Tokyo".to_string());

        let activities = vec![a, b, c, d];
        let title = SortOrTitle::Title("Night".to_string());

        let result = aggregate(
            &activities,
            Some(filter_by_year),
            "2024",
            Some(&title),
            Some("Tokyo"),
        );

        assert_eq!(ids(&result), vec![ActivityId::Number(4)]);
        for activity in &result.filtered_activities {
            assert!(activities.contains(activity));
            assert!(filter_by_year(activity, "2024"));
            assert!(filter_by_title(activity, "Night"));
            assert!(filter_by_location(activity, "Tokyo"));
        }
    }

    #[test]
    fn test_sums() {
        let mut a = create_test_activity(1, "2024-01-01", 25.5);
        a.moving_time = Some("1:02:03".to_string());
        let mut b = create_test_activity(2, "2024-01-02", 14.5);
        b.moving_time = Some("bad:input".to_string());
        let mut c = create_test_activity(3, "2024-01-03", 0.0);
        c.moving_time = None;

        let result = aggregate(&[a, b, c], None, "", None, None);

        assert_eq!(result.total_count, 3);
        assert_eq!(result.sum_distance, 40.0);
        assert_eq!(result.sum_moving_time, 3723);
    }

    #[test]
    fn test_heart_rate_average_counts_missing_as_zero() {
        let mut a = create_test_activity(1, "2024-01-01", 10.0);
        a.average_heartrate = Some(150.0);
        let b = create_test_activity(2, "2024-01-02", 10.0);
        let mut c = create_test_activity(3, "2024-01-03", 10.0);
        c.average_heartrate = Some(160.0);

        let result = aggregate(&[a, b, c], None, "", None, None);

        assert!((result.average_heart_rate - 310.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input() {
        let result = aggregate(&[], Some(filter_by_year), "2024", None, None);
        assert_eq!(result, AggregateResult::default());
        assert_eq!(result.total_count, 0);
        assert_eq!(result.sum_distance, 0.0);
        assert_eq!(result.sum_moving_time, 0);
        assert_eq!(result.average_heart_rate, 0.0);
    }

    #[test]
    fn test_filter_removing_everything() {
        let activities = vec![create_test_activity(1, "2024-01-01", 10.0)];
        let result = aggregate(&activities, Some(filter_by_year), "1999", None, None);
        assert_eq!(result, AggregateResult::default());
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let mut a = create_test_activity(1, "2024-01-01", 12.0);
        a.average_heartrate = Some(99.0);
        let activities = vec![
            a,
            create_test_activity(2, "2024-03-01", 7.0),
            create_test_activity(3, "not a date", 3.0),
        ];

        let first = aggregate(&activities, Some(filter_by_year), "2024", None, None);
        let second = aggregate(&activities, Some(filter_by_year), "2024", None, None);
        assert_eq!(first, second);
    }
}
