//! Logger initialization and progress logging.

use std::io::Write;

use colored::*;
use log::{info, LevelFilter};

use crate::config::LogFormat;
use crate::error_handling::{InitializationError, ParseStats};

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors and emojis) and JSON formats for structured logging.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter will override it. This allows
/// `RUST_LOG=debug` for quick debugging while still supporting explicit CLI
/// control via `--log-level`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if logger setup fails.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    // Read from RUST_LOG environment variable first, then override with CLI arg
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("crawl_budget", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                writeln!(
                    buf,
                    "{} [{}] {}",
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // Use try_init() so tests that initialize the logger repeatedly don't panic
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// Logs throughput for the streaming parse loop.
pub fn log_progress(start_time: std::time::Instant, stats: &ParseStats) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let lines = stats.lines_read();
    let rate = if elapsed_secs > 0.0 {
        lines as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Read {} lines ({} parsed, {} skipped) in {:.2} seconds (~{:.0} lines/sec)",
        lines,
        stats.records_parsed(),
        stats.total_skipped(),
        elapsed_secs,
        rate
    );
}
