//! Report rendering.
//!
//! Markdown and JSON render the whole report; CSV exports only the
//! filtered activities.

pub mod export;
pub mod generator;

pub use export::generate_csv_report;
pub use generator::{generate_json_report, generate_markdown_report};
