//! crawl_budget library: access-log crawl-budget analytics
//!
//! This library parses web-server access logs in Combined Log Format,
//! classifies search-engine bot traffic with an ordered first-match-wins
//! pattern table, and computes crawl-budget analytics: summaries, bot
//! breakdowns, time series, crawl-trap detection, and error reports.
//!
//! # Example
//!
//! ```
//! use crawl_budget::{CrawlAnalytics, LogParser};
//!
//! let parser = LogParser::new();
//! let lines = [
//!     r#"66.249.66.1 - - [01/Dec/2024:10:30:45 +0000] "GET /page.html HTTP/1.1" 200 1234 "-" "Mozilla/5.0 (compatible; Googlebot/2.1)""#,
//! ];
//! let analytics = CrawlAnalytics::new(parser.parse_many(lines, None));
//! let summary = analytics.crawl_budget_summary();
//! assert_eq!(summary.bot_requests, 1);
//! ```
//!
//! Parsing and analytics are synchronous; only the file-reading entry point
//! ([`run_report`]) is async, because it streams lines off a Tokio reader.

#![warn(missing_docs)]

pub mod analytics;
pub mod app;
pub mod bots;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod models;
pub mod parser;

// Re-export public API
pub use analytics::CrawlAnalytics;
pub use bots::BotPatternTable;
pub use config::{Config, LogFormat, LogLevel};
pub use models::LogRecord;
pub use parser::LogParser;
pub use run::{run_report, RunReport};

// Internal run module (contains the main analysis pipeline)
mod run {
    use anyhow::{Context, Result};
    use log::{info, warn};
    use std::path::PathBuf;
    use tokio::io::{AsyncBufReadExt, BufReader};

    use crate::analytics::CrawlAnalytics;
    use crate::app::{log_progress, print_parse_statistics, print_report};
    use crate::config::{Config, PROGRESS_LOG_INTERVAL_LINES};
    use crate::error_handling::ParseStats;
    use crate::export::{
        export_bot_distribution_csv, export_daily_report_csv, export_path_frequency_csv,
        export_summary_json,
    };
    use crate::parser::LogParser;

    /// Results of an analysis run.
    ///
    /// Contains input and parse counters for the completed run.
    #[derive(Debug, Clone)]
    pub struct RunReport {
        /// Lines read from the input (bounded by `--limit`)
        pub lines_read: usize,
        /// Lines that parsed into records
        pub records_parsed: usize,
        /// Lines skipped as unparseable
        pub lines_skipped: usize,
        /// Parsed records that came from known bots
        pub bot_records: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs a full log analysis with the provided configuration.
    ///
    /// This is the main entry point for the library. It streams lines from
    /// the input file (or stdin when the path is `-`), parses them into
    /// records, prints the crawl-budget report, and writes the export tables
    /// when an output directory is configured.
    ///
    /// Unparseable lines are skipped and counted, never fatal; an empty or
    /// fully-malformed input produces an empty (but valid) report.
    ///
    /// # Errors
    ///
    /// Returns an error if the input file cannot be opened or an export
    /// target cannot be written.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use crawl_budget::{run_report, Config};
    /// use std::path::PathBuf;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = Config {
    ///     file: PathBuf::from("access.log"),
    ///     ..Default::default()
    /// };
    /// let report = run_report(config).await?;
    /// println!("Parsed {} records", report.records_parsed);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_report(config: Config) -> Result<RunReport> {
        let parser = LogParser::new();
        let stats = ParseStats::new();
        let start_time = std::time::Instant::now();

        let is_stdin = config.file.as_os_str() == "-";

        let mut stdin_lines = if is_stdin {
            info!("Reading log lines from stdin");
            Some(BufReader::new(tokio::io::stdin()).lines())
        } else {
            None
        };

        let mut file_lines = if !is_stdin {
            let file = tokio::fs::File::open(&config.file)
                .await
                .with_context(|| format!("Failed to open log file: {}", config.file.display()))?;
            Some(BufReader::new(file).lines())
        } else {
            None
        };

        let mut records = Vec::new();

        loop {
            // The limit counts lines examined, not lines successfully parsed.
            if let Some(max) = config.limit {
                if stats.lines_read() >= max {
                    info!("Line limit of {} reached, stopping input", max);
                    break;
                }
            }

            let line_result = if is_stdin {
                stdin_lines
                    .as_mut()
                    .expect("stdin_lines should be Some when is_stdin is true")
                    .next_line()
                    .await
            } else {
                file_lines
                    .as_mut()
                    .expect("file_lines should be Some when is_stdin is false")
                    .next_line()
                    .await
            };
            let line = match line_result {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read line from input: {e}");
                    continue;
                }
            };

            stats.record_line_read();
            match parser.try_parse_line(line.trim()) {
                Ok(record) => {
                    stats.record_parsed();
                    records.push(record);
                }
                Err(reason) => stats.record_skipped(reason),
            }

            if stats.lines_read() % PROGRESS_LOG_INTERVAL_LINES == 0 {
                log_progress(start_time, &stats);
            }
        }

        let analytics = CrawlAnalytics::new(records);
        print_report(&analytics, &config);
        print_parse_statistics(&stats);

        if let Some(dir) = &config.output_dir {
            export_tables(&analytics, dir)?;
        }

        Ok(RunReport {
            lines_read: stats.lines_read(),
            records_parsed: stats.records_parsed(),
            lines_skipped: stats.total_skipped(),
            bot_records: analytics.bot_record_count(),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

    /// Writes the CSV/JSON export tables into `dir`, creating it if needed.
    fn export_tables(analytics: &CrawlAnalytics, dir: &PathBuf) -> Result<()> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

        let distribution = analytics.bot_distribution();
        let written =
            export_bot_distribution_csv(&distribution, Some(&dir.join("bot_distribution.csv")))?;
        info!("Exported bot distribution ({} rows)", written);

        let daily = analytics.daily_crawl_report();
        let written = export_daily_report_csv(&daily, Some(&dir.join("daily_report.csv")))?;
        info!("Exported daily report ({} rows)", written);

        let frequency = analytics.crawl_frequency_by_path(crate::config::DEFAULT_MIN_CRAWLS);
        let written =
            export_path_frequency_csv(&frequency, Some(&dir.join("path_frequency.csv")))?;
        info!("Exported path frequency ({} rows)", written);

        let summary = analytics.crawl_budget_summary();
        export_summary_json(&summary, Some(&dir.join("summary.json")))?;
        info!("Exported summary to {}", dir.join("summary.json").display());

        Ok(())
    }
}
