//! Main application modules.
//!
//! This module provides the logger setup, progress logging, and console
//! report rendering used by the binary and the run orchestration.

pub mod logging;
pub mod statistics;

// Re-export public API
pub use logging::{init_logger_with, log_progress};
pub use statistics::{print_parse_statistics, print_report};
