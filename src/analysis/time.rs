//! Duration and timestamp helpers.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a colon-separated duration into seconds.
///
/// The last component is seconds, the one before it minutes, and so on.
/// Any component that is not a number makes the whole value zero.
pub fn parse_moving_time(text: &str) -> u64 {
    let mut total: u64 = 0;

    for (power, part) in text.rsplit(':').enumerate() {
        let Some(value) = parse_component(part) else {
            return 0;
        };

        let weight = u32::try_from(power)
            .ok()
            .and_then(|p| 60u64.checked_pow(p));
        let Some(contribution) = weight.and_then(|w| value.checked_mul(w)) else {
            return 0;
        };
        let Some(sum) = total.checked_add(contribution) else {
            return 0;
        };
        total = sum;
    }

    total
}

/// Parse one duration component, keeping the integer part of `"05.5"`.
///
/// Only plain digits with an optional decimal fraction are accepted.
fn parse_component(part: &str) -> Option<u64> {
    let (whole, fraction) = match part.trim().split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (part.trim(), ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
        return None;
    }

    whole.parse().ok()
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a local start timestamp.
///
/// RFC 3339 values keep their wall-clock time and drop the offset.
pub fn parse_start_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `"Ns"` under a minute, otherwise `"M:SS"`.
pub fn minutes_and_seconds(seconds: u64) -> String {
    let minutes = seconds / 60;
    let rest = seconds % 60;
    if minutes == 0 {
        format!("{}s", rest)
    } else {
        format!("{}:{:02}", minutes, rest)
    }
}

/// `"Xh Ym"` for a total duration.
pub fn hours_and_minutes(seconds: u64) -> String {
    format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
}
