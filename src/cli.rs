//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// pushup-stats - summarize your pushup log
///
/// Reads the activities exported by the tracker, filters them by year,
/// title or location, and writes totals, streaks and monthly summaries
/// as Markdown, JSON or CSV.
///
/// Examples:
///   pushup-stats --input activities.json
///   pushup-stats --input activities.json --year 2023 --title Morning
///   pushup-stats --input activities.json --year total --sort count-desc --format json
///   pushup-stats --input activities.json --location Berlin --format csv -o berlin.csv
///   pushup-stats --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Activities JSON file to read
    ///
    /// Can also be set via PUSHUP_ACTIVITIES env var or .pushup.toml config.
    #[arg(short, long, value_name = "FILE", env = "PUSHUP_ACTIVITIES")]
    pub input: Option<PathBuf>,

    /// Year to show (four digits), or "total" for all years
    ///
    /// Defaults to the newest year present in the data.
    #[arg(short, long, value_name = "YEAR")]
    pub year: Option<String>,

    /// Only include activities whose name contains this text
    #[arg(short, long, value_name = "TEXT", conflicts_with = "sort")]
    pub title: Option<String>,

    /// Only include activities whose location contains this text
    #[arg(short, long, value_name = "TEXT")]
    pub location: Option<String>,

    /// Ordering of the activity list (newest first by default)
    #[arg(short, long, value_name = "ORDER")]
    pub sort: Option<SortOrder>,

    /// Output format (markdown, json, csv)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Output file path for the report (standard output if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of entries in the recent records list
    #[arg(long, value_name = "COUNT")]
    pub recent: Option<usize>,

    /// Date the day streak is measured against (YYYY-MM-DD)
    ///
    /// Defaults to the local date.
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .pushup.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .pushup.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
    /// CSV of the filtered activities
    Csv,
}

/// Ordering of the filtered activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Newest first
    DateDesc,
    /// Oldest first
    DateAsc,
    /// Most pushups first
    CountDesc,
}

impl SortOrder {
    /// Name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::DateDesc => "date-desc",
            SortOrder::DateAsc => "date-asc",
            SortOrder::CountDesc => "count-desc",
        }
    }
}

/// Check a year filter value: four ASCII digits or `total`.
pub fn validate_year(year: &str) -> Result<(), String> {
    if year.eq_ignore_ascii_case("total") {
        return Ok(());
    }

    if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(format!(
            "Year must be four digits or 'total', got '{}'",
            year
        ))
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref year) = self.year {
            validate_year(year)?;
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.recent == Some(0) {
            return Err("Recent records must be at least 1".to_string());
        }

        // Validate input file if provided
        if let Some(ref input) = self.input {
            if !input.exists() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
            if !input.is_file() {
                return Err(format!("Input path is not a file: {}", input.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            input: None,
            year: None,
            title: None,
            location: None,
            sort: None,
            format: None,
            output: None,
            recent: None,
            today: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_validate_year() {
        assert!(validate_year("2024").is_ok());
        assert!(validate_year("total").is_ok());
        assert!(validate_year("Total").is_ok());
        assert!(validate_year("20").is_err());
        assert!(validate_year("202a").is_err());
        assert!(validate_year("20245").is_err());
    }

    #[test]
    fn test_validation_invalid_year() {
        let mut args = make_args();
        args.year = Some("24".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_missing_input() {
        let mut args = make_args();
        args.input = Some(PathBuf::from("/no/such/activities.json"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_recent() {
        let mut args = make_args();
        args.recent = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_init_config_skips_validation() {
        let mut args = make_args();
        args.init_config = true;
        args.year = Some("bad".to_string());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_title_conflicts_with_sort() {
        let result = Args::try_parse_from([
            "pushup-stats",
            "--title",
            "Morning",
            "--sort",
            "date-asc",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_values() {
        let args = Args::try_parse_from([
            "pushup-stats",
            "-i",
            "activities.json",
            "--sort",
            "count-desc",
            "--format",
            "csv",
            "--today",
            "2025-01-10",
        ])
        .unwrap();

        assert_eq!(args.sort, Some(SortOrder::CountDesc));
        assert_eq!(args.format, Some(OutputFormat::Csv));
        assert_eq!(args.today, NaiveDate::from_ymd_opt(2025, 1, 10));
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
