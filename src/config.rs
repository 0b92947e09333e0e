use std::path::PathBuf;

use clap::{Parser, ValueEnum};

// constants (used as defaults)
/// Minimum bot requests for a path to appear in the crawl-frequency table.
pub const DEFAULT_MIN_CRAWLS: usize = 5;
/// Bot-request count a path must strictly exceed to be flagged as a crawl trap.
pub const DEFAULT_TRAP_THRESHOLD: usize = 100;
/// Status code used for the error-pages report.
pub const DEFAULT_ERROR_STATUS: u16 = 404;
/// Number of paths kept in the Googlebot top-crawled-paths table.
pub const TOP_CRAWLED_PATHS_LIMIT: usize = 20;
/// How often the streaming read loop logs progress, in lines.
pub const PROGRESS_LOG_INTERVAL_LINES: usize = 100_000;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Informational messages (default).
    Info,
    /// Debug detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors.
    Plain,
    /// Structured JSON lines.
    Json,
}

/// Command-line options and configuration.
///
/// This struct is generated by `clap` from the field attributes. All options
/// have sensible defaults and can be overridden via command-line flags.
///
/// # Examples
///
/// ```bash
/// # Analyze a log file with defaults
/// crawl_budget access.log
///
/// # Read from stdin, stop after 10000 lines, export CSV/JSON tables
/// zcat access.log.gz | crawl_budget - --limit 10000 --output-dir ./report
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "crawl_budget",
    about = "Parses web-server access logs and reports crawl-budget analytics for search-engine bots."
)]
pub struct Config {
    /// Access log file to read (Combined Log Format); use `-` for stdin
    #[arg(value_parser)]
    pub file: PathBuf,

    /// Stop after examining this many lines (counts lines read, not parsed)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Minimum crawls for a path to appear in the crawl-frequency table
    #[arg(long, default_value_t = DEFAULT_MIN_CRAWLS)]
    pub min_crawls: usize,

    /// Crawl count a path must exceed to be flagged as a crawl trap
    #[arg(long, default_value_t = DEFAULT_TRAP_THRESHOLD)]
    pub trap_threshold: usize,

    /// Status code for the error-pages report
    #[arg(long, default_value_t = DEFAULT_ERROR_STATUS)]
    pub error_status: u16,

    /// Restrict the daily time series to one bot type (exact name)
    #[arg(long)]
    pub bot: Option<String>,

    /// Directory for CSV/JSON export; created if missing, no export if unset
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file: PathBuf::from("-"),
            limit: None,
            min_crawls: DEFAULT_MIN_CRAWLS,
            trap_threshold: DEFAULT_TRAP_THRESHOLD,
            error_status: DEFAULT_ERROR_STATUS,
            bot: None,
            output_dir: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
