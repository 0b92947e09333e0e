//! JSON export functionality.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::analytics::CrawlBudgetSummary;

/// Exports the crawl-budget summary as pretty-printed JSON.
///
/// Writes to `output`, or to stdout when no path is given.
pub fn export_summary_json(summary: &CrawlBudgetSummary, output: Option<&Path>) -> Result<()> {
    let body = serde_json::to_string_pretty(summary).context("Failed to serialize summary")?;
    match output {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            file.write_all(body.as_bytes())?;
            file.write_all(b"\n")?;
        }
        None => println!("{}", body),
    }
    Ok(())
}
