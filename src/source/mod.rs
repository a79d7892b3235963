//! Activity record loading.
//!
//! This module reads the `activities.json` array published by the
//! tracker and checks the record invariants the aggregator relies on.

use crate::models::{Activity, ActivityId};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Failure to obtain a usable record collection.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse activities: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate activity id: {0}")]
    DuplicateId(ActivityId),
    #[error("activity {id} has a negative distance ({distance})")]
    NegativeDistance { id: ActivityId, distance: f64 },
}

/// Load and validate activities from a JSON file.
pub fn load_activities(path: &Path) -> Result<Vec<Activity>, SourceError> {
    info!("Loading activities from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let activities = parse_activities(&content)?;
    debug!("Loaded {} activities", activities.len());

    Ok(activities)
}

/// Parse and validate activities from a JSON string.
pub fn parse_activities(content: &str) -> Result<Vec<Activity>, SourceError> {
    let activities: Vec<Activity> = serde_json::from_str(content)?;
    validate(&activities)?;
    Ok(activities)
}

fn validate(activities: &[Activity]) -> Result<(), SourceError> {
    let mut seen: HashSet<&ActivityId> = HashSet::with_capacity(activities.len());

    for activity in activities {
        if !seen.insert(&activity.id) {
            return Err(SourceError::DuplicateId(activity.id.clone()));
        }

        if activity.distance < 0.0 {
            return Err(SourceError::NegativeDistance {
                id: activity.id.clone(),
                distance: activity.distance,
            });
        }
    }

    Ok(())
}
