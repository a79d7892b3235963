//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.pushup.toml` files.

use crate::cli::{Args, OutputFormat, SortOrder};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".pushup.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Default filters.
    #[serde(default)]
    pub filter: FilterConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Activities file to read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,

    /// Report destination. Standard output when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,
}

/// Filters applied when the command line does not name any.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Four-digit year or `total`. The newest year in the data when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    /// Name substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Location substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Ordering. Ignored while a title filter is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Entries in the "Recent Records" list.
    #[serde(default = "default_recent_records")]
    pub recent_records: usize,

    /// Points on the recent-activity series.
    #[serde(default = "default_recent_points")]
    pub recent_points: usize,

    /// Months in the monthly summary.
    #[serde(default = "default_monthly_months")]
    pub monthly_months: usize,

    /// Weeks in the weekly summary.
    #[serde(default = "default_weekly_weeks")]
    pub weekly_weeks: usize,

    /// Include the full activity table in Markdown reports.
    #[serde(default = "default_true")]
    pub show_table: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            recent_records: default_recent_records(),
            recent_points: default_recent_points(),
            monthly_months: default_monthly_months(),
            weekly_weeks: default_weekly_weeks(),
            show_table: true,
        }
    }
}

fn default_recent_records() -> usize {
    5
}

fn default_recent_points() -> usize {
    30
}

fn default_monthly_months() -> usize {
    12
}

fn default_weekly_weeks() -> usize {
    52
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when the CLI actually provides a value.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(ref input) = args.input {
            self.general.input = Some(input.clone());
        }
        if let Some(ref output) = args.output {
            self.general.output = Some(output.clone());
        }
        if let Some(format) = args.format {
            self.general.format = format;
        }

        if let Some(ref year) = args.year {
            self.filter.year = Some(year.clone());
        }
        if let Some(ref title) = args.title {
            self.filter.title = Some(title.clone());
            // The title and the ordering share one slot; the CLI choice wins.
            self.filter.sort = None;
        }
        if let Some(ref location) = args.location {
            self.filter.location = Some(location.clone());
        }
        if let Some(sort) = args.sort {
            self.filter.sort = Some(sort);
            self.filter.title = None;
        }

        if let Some(recent) = args.recent {
            self.report.recent_records = recent;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
