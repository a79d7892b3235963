//! Markdown and JSON report generation.
//!
//! This module renders the report built from the aggregation result.

use crate::analysis::time::{hours_and_minutes, minutes_and_seconds, parse_moving_time};
use crate::config::ReportConfig;
use crate::models::{Activity, MonthTotal, Report, ReportMetadata, Summary, YearTotal};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report, settings: &ReportConfig) -> String {
    let mut output = String::new();

    // Title
    output.push_str("# Pushup Report\n\n");

    output.push_str(&generate_metadata_section(&report.metadata, &report.years));
    output.push_str(&generate_summary_section(&report.summary));
    output.push_str(&generate_recent_section(
        &report.activities,
        settings.recent_records,
    ));
    output.push_str(&generate_monthly_section(&report.monthly));
    output.push_str(&generate_yearly_section(&report.yearly));

    if settings.show_table {
        output.push_str(&generate_activity_table(&report.activities));
    }

    output.push_str(&generate_footer(&report.metadata));

    output
}

/// Generate the filter description.
fn generate_metadata_section(metadata: &ReportMetadata, years: &[String]) -> String {
    let mut section = String::new();

    section.push_str("## Filters\n\n");
    section.push_str(&format!(
        "- **Year:** {}\n",
        metadata.year.as_deref().unwrap_or("All")
    ));
    if let Some(ref title) = metadata.title {
        section.push_str(&format!("- **Title contains:** {}\n", title));
    }
    if let Some(ref location) = metadata.location {
        section.push_str(&format!("- **Location contains:** {}\n", location));
    }
    section.push_str(&format!("- **Order:** {}\n", metadata.sort));
    section.push_str(&format!(
        "- **Records:** {} of {}\n",
        metadata.records_matched, metadata.records_loaded
    ));
    if !years.is_empty() {
        section.push_str(&format!("- **Years on record:** {}\n", years.join(", ")));
    }
    section.push('\n');

    section
}

/// Generate the statistics overview.
fn generate_summary_section(summary: &Summary) -> String {
    let mut section = String::new();

    section.push_str("## Statistics Overview\n\n");
    section.push_str("| Statistic | Value |\n");
    section.push_str("|:---|---:|\n");
    section.push_str(&format!(
        "| Total Pushups | {} |\n",
        int_comma(summary.total_pushups)
    ));
    section.push_str(&format!("| Activities | {} |\n", summary.total_count));
    section.push_str(&format!("| Streak | {} |\n", summary.total_count));
    section.push_str(&format!("| Day Streak | {} |\n", summary.day_streak));
    section.push_str(&format!(
        "| Max Pushups | {} |\n",
        int_comma(summary.max_pushups)
    ));
    section.push_str(&format!(
        "| Average Pushups | {:.1} |\n",
        summary.average_pushups
    ));

    if summary.total_moving_time > 0 {
        section.push_str(&format!(
            "| Total Time | {} |\n",
            hours_and_minutes(summary.total_moving_time)
        ));
    }

    if summary.average_heart_rate > 0.0 {
        section.push_str(&format!(
            "| Average Heart Rate | {} bpm |\n",
            summary.average_heart_rate.round()
        ));
    }

    section.push('\n');

    section
}

/// Generate the most recent records in report order.
fn generate_recent_section(activities: &[Activity], limit: usize) -> String {
    let mut section = String::new();

    section.push_str("## Recent Records\n\n");

    if activities.is_empty() {
        section.push_str("No data available\n\n");
        return section;
    }

    for activity in activities.iter().take(limit) {
        section.push_str(&format!(
            "- {}: **{}**\n",
            display_date(activity),
            pushups_label(activity.distance)
        ));
    }
    section.push('\n');

    section
}

/// Generate the monthly summary table.
fn generate_monthly_section(months: &[MonthTotal]) -> String {
    if months.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Monthly Summary\n\n");
    section.push_str("| Month | Total Pushups | Activities |\n");
    section.push_str("|:---|---:|---:|\n");

    for month in months {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            month.month,
            int_comma(month.pushups),
            month.count
        ));
    }
    section.push('\n');

    section
}

/// Generate the yearly totals table.
fn generate_yearly_section(years: &[YearTotal]) -> String {
    if years.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Yearly Totals\n\n");
    section.push_str("| Year | Total Pushups | Activities |\n");
    section.push_str("|:---|---:|---:|\n");

    for year in years {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            year.year,
            int_comma(year.pushups),
            year.count
        ));
    }
    section.push('\n');

    section
}

/// Generate the full activity table.
fn generate_activity_table(activities: &[Activity]) -> String {
    if activities.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Activities\n\n");
    section.push_str("| Name | Pushups | Time | Heart Rate | Date | Location |\n");
    section.push_str("|:---|---:|---:|---:|:---|:---|\n");

    for activity in activities {
        let heart_rate = activity
            .average_heartrate
            .map(|hr| format!("{}", hr.round()))
            .unwrap_or_default();

        section.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            escape_cell(&activity.name),
            activity.pushups(),
            minutes_and_seconds(parse_moving_time(activity.moving_time_or_zero())),
            heart_rate,
            display_date(activity),
            escape_cell(activity.location_country.as_deref().unwrap_or("")),
        ));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer(metadata: &ReportMetadata) -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(&format!(
        "*Generated from `{}` on {}*\n",
        metadata.source,
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    footer
}

/// Insert thousands separators: `1234567` becomes `"1,234,567"`.
pub fn int_comma(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// A repetition count for display, e.g. `"42 pushups"`.
pub fn pushups_label(distance: f64) -> String {
    format!("{} pushups", distance.max(0.0).round())
}

/// The date part of the start timestamp.
fn display_date(activity: &Activity) -> &str {
    let date = activity.start_date_local.as_str();
    date.get(..10).unwrap_or(date)
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
