//! Export functionality for crawl-budget analytics.
//!
//! This module writes the aggregate tables to CSV and the crawl-budget
//! summary to JSON, for consumption by spreadsheets and downstream
//! reporting tools.

mod csv;
mod json;

pub use csv::{export_bot_distribution_csv, export_daily_report_csv, export_path_frequency_csv};
pub use json::export_summary_json;
