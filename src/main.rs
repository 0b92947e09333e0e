//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `crawl_budget` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use crawl_budget::app::init_logger_with;
use crawl_budget::{run_report, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Run the analysis using the library
    match run_report(config).await {
        Ok(report) => {
            println!(
                "✅ Parsed {} of {} line{} ({} bot request{}, {} skipped) in {:.1}s",
                report.records_parsed,
                report.lines_read,
                if report.lines_read == 1 { "" } else { "s" },
                report.bot_records,
                if report.bot_records == 1 { "" } else { "s" },
                report.lines_skipped,
                report.elapsed_seconds
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("crawl_budget error: {:#}", e);
            process::exit(1);
        }
    }
}
