//! pushup-stats - personal pushup log summaries
//!
//! A CLI tool that loads pushup activity records, filters them by
//! year, title and location, and writes totals, streaks and monthly
//! summaries as Markdown, JSON or CSV.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (bad arguments, unreadable input, write failure)

mod analysis;
mod cli;
mod config;
mod models;
mod report;
mod source;

use analysis::series::{
    available_years, monthly_totals, recent_points, weekly_totals, yearly_totals,
};
use analysis::streak::{activity_dates, calculate_day_streak};
use analysis::{aggregate, filter_by_year, FilterFn, SortOrTitle};
use anyhow::{anyhow, Context, Result};
use chrono::{Local, Utc};
use cli::{Args, OutputFormat, SortOrder};
use config::{Config, CONFIG_FILE};
use models::{Report, ReportMetadata, Summary};
use std::io::Write;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    debug!("pushup-stats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Report failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .pushup.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("Created {} with default settings.", CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so a report on stdout stays clean.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load records, aggregate them and write the report.
fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let input = config
        .general
        .input
        .clone()
        .ok_or_else(|| anyhow!("No activities file given: use --input or set general.input"))?;

    if let Some(ref year) = config.filter.year {
        cli::validate_year(year).map_err(|e| anyhow!(e))?;
    }

    let activities = source::load_activities(&input)
        .with_context(|| format!("Failed to load activities from {}", input.display()))?;

    let years = available_years(&activities);
    let year = resolve_year(config.filter.year.as_deref(), &years);
    let selector = build_selector(config.filter.title.as_deref(), config.filter.sort);
    let year_filter: Option<FilterFn> = year.as_ref().map(|_| filter_by_year as FilterFn);

    let result = aggregate(
        &activities,
        year_filter,
        year.as_deref().unwrap_or(""),
        selector.as_ref(),
        config.filter.location.as_deref(),
    );

    info!(
        "{} of {} activities match, {} pushups",
        result.total_count,
        activities.len(),
        result.sum_distance.round()
    );

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let day_streak = calculate_day_streak(&activity_dates(&activities), today);
    debug!("Day streak as of {}: {}", today, day_streak);

    let settings = &config.report;
    let filtered = &result.filtered_activities;

    let report = Report {
        metadata: ReportMetadata {
            source: input.display().to_string(),
            generated_at: Utc::now(),
            year,
            title: config.filter.title.clone(),
            location: config
                .filter
                .location
                .clone()
                .filter(|l| !l.is_empty()),
            sort: config
                .filter
                .sort
                .filter(|_| config.filter.title.is_none())
                .unwrap_or(SortOrder::DateDesc)
                .as_str()
                .to_string(),
            records_loaded: activities.len(),
            records_matched: result.total_count,
        },
        summary: Summary::from_result(&result, day_streak),
        years,
        recent: recent_points(filtered, settings.recent_points),
        monthly: monthly_totals(filtered, settings.monthly_months),
        yearly: yearly_totals(filtered),
        weekly: weekly_totals(filtered, settings.weekly_weeks),
        activities: result.filtered_activities.clone(),
    };

    let output = match config.general.format {
        OutputFormat::Markdown => report::generate_markdown_report(&report, settings),
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Csv => report::generate_csv_report(&report.activities)?,
    };

    match config.general.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report saved to: {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .context("Failed to write report to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Pick the year filter: `total` means none, no choice means the newest year.
fn resolve_year(requested: Option<&str>, years: &[String]) -> Option<String> {
    match requested {
        Some(year) if year.eq_ignore_ascii_case("total") => None,
        Some(year) => Some(year.to_string()),
        None => years.first().cloned(),
    }
}

/// A title filter takes the selector slot; otherwise the chosen ordering does.
fn build_selector(title: Option<&str>, sort: Option<SortOrder>) -> Option<SortOrTitle> {
    if let Some(title) = title {
        return Some(SortOrTitle::Title(title.to_string()));
    }

    sort.map(|order| {
        SortOrTitle::Sort(match order {
            SortOrder::DateDesc => analysis::sort_by_date_desc,
            SortOrder::DateAsc => analysis::sort_by_date_asc,
            SortOrder::CountDesc => analysis::sort_by_distance_desc,
        })
    })
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
