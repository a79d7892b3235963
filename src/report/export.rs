//! CSV export of filtered activities.

use crate::analysis::time::parse_moving_time;
use crate::models::Activity;
use anyhow::Result;
use std::io::Write;

const HEADER: [&str; 8] = [
    "id",
    "name",
    "pushups",
    "moving_time",
    "moving_seconds",
    "start_date_local",
    "location_country",
    "average_heartrate",
];

/// Write one row per activity, in the given order.
pub fn write_activities_csv<W: Write>(activities: &[Activity], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(HEADER)?;

    for activity in activities {
        writer.write_record([
            activity.id.to_string(),
            activity.name.clone(),
            activity.pushups().to_string(),
            activity.moving_time.clone().unwrap_or_default(),
            parse_moving_time(activity.moving_time_or_zero()).to_string(),
            activity.start_date_local.clone(),
            activity.location_country.clone().unwrap_or_default(),
            activity
                .average_heartrate
                .map(|hr| format!("{:.1}", hr))
                .unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Render activities as a CSV string.
pub fn generate_csv_report(activities: &[Activity]) -> Result<String> {
    let mut buffer = Vec::new();
    write_activities_csv(activities, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
