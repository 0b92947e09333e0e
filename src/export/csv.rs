//! CSV export functionality.
//!
//! Exports analytics tables to CSV format, one row per aggregate row.
//! Each function writes to a file path or to stdout when no path is given,
//! and returns the number of data rows written.

use anyhow::{Context, Result};
use csv::Writer;
use std::io::{self, Write};
use std::path::Path;

use crate::analytics::{BotDistributionRow, DailyCrawlRow, PathFrequencyRow};

/// Creates a CSV writer over a file or stdout.
fn csv_writer(output: Option<&Path>) -> Result<Writer<Box<dyn Write>>> {
    let writer: Writer<Box<dyn Write>> = if let Some(path) = output {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Writer::from_writer(Box::new(file) as Box<dyn Write>)
    } else {
        Writer::from_writer(Box::new(io::stdout()) as Box<dyn Write>)
    };
    Ok(writer)
}

/// Exports the bot distribution table.
///
/// # Returns
///
/// The number of rows written, or an error if the target is unwritable.
pub fn export_bot_distribution_csv(
    rows: &[BotDistributionRow],
    output: Option<&Path>,
) -> Result<usize> {
    let mut writer = csv_writer(output)?;
    writer.write_record([
        "bot_type",
        "total_requests",
        "successful_requests",
        "total_bytes",
        "success_rate",
    ])?;
    for row in rows {
        writer.write_record(&[
            row.bot_type.clone(),
            row.total_requests.to_string(),
            row.successful_requests.to_string(),
            row.total_bytes.to_string(),
            format!("{:.2}", row.success_rate),
        ])?;
    }
    writer.flush()?;
    Ok(rows.len())
}

/// Exports the daily crawl report.
///
/// # Returns
///
/// The number of rows written, or an error if the target is unwritable.
pub fn export_daily_report_csv(rows: &[DailyCrawlRow], output: Option<&Path>) -> Result<usize> {
    let mut writer = csv_writer(output)?;
    writer.write_record([
        "date",
        "total_crawls",
        "successful",
        "errors_4xx",
        "errors_5xx",
        "unique_bots",
        "total_bytes",
    ])?;
    for row in rows {
        writer.write_record(&[
            row.date.format("%Y-%m-%d").to_string(),
            row.total_crawls.to_string(),
            row.successful.to_string(),
            row.errors_4xx.to_string(),
            row.errors_5xx.to_string(),
            row.unique_bots.to_string(),
            row.total_bytes.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(rows.len())
}

/// Exports the per-path crawl frequency table.
///
/// # Returns
///
/// The number of rows written, or an error if the target is unwritable.
pub fn export_path_frequency_csv(
    rows: &[PathFrequencyRow],
    output: Option<&Path>,
) -> Result<usize> {
    let mut writer = csv_writer(output)?;
    writer.write_record(["path", "crawl_count", "primary_bot", "success_rate"])?;
    for row in rows {
        writer.write_record(&[
            row.path.clone(),
            row.crawl_count.to_string(),
            row.primary_bot.clone(),
            format!("{:.2}", row.success_rate),
        ])?;
    }
    writer.flush()?;
    Ok(rows.len())
}
