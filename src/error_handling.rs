use log::SetLoggerError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Why a log line produced no record.
///
/// Skipping a line is expected, non-exceptional behavior: the batch never
/// fails because of a bad line. These variants exist so the run loop can
/// report how much of the input was usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum SkipReason {
    /// The line did not match the Combined Log Format grammar.
    LineFormat,
    /// The bracketed timestamp matched neither accepted format.
    Timestamp,
}

impl SkipReason {
    /// Human-readable label for log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::LineFormat => "line format mismatch",
            SkipReason::Timestamp => "unparseable timestamp",
        }
    }
}

/// Thread-safe counters for a parsing run.
///
/// Tracks lines read, records parsed, and skips per [`SkipReason`] using
/// atomic counters. All counters start at zero.
pub struct ParseStats {
    lines_read: AtomicUsize,
    records_parsed: AtomicUsize,
    skipped: HashMap<SkipReason, AtomicUsize>,
}

impl ParseStats {
    /// Creates a tracker with all counters at zero.
    pub fn new() -> Self {
        let mut skipped = HashMap::new();
        for reason in SkipReason::iter() {
            skipped.insert(reason, AtomicUsize::new(0));
        }
        ParseStats {
            lines_read: AtomicUsize::new(0),
            records_parsed: AtomicUsize::new(0),
            skipped,
        }
    }

    /// Records one line read from the input.
    pub fn record_line_read(&self) {
        self.lines_read.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one successfully parsed record.
    pub fn record_parsed(&self) {
        self.records_parsed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one skipped line.
    pub fn record_skipped(&self, reason: SkipReason) {
        // All SkipReason variants are initialized in new(), so unwrap() is safe
        self.skipped
            .get(&reason)
            .unwrap()
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Lines read so far.
    pub fn lines_read(&self) -> usize {
        self.lines_read.load(Ordering::SeqCst)
    }

    /// Records parsed so far.
    pub fn records_parsed(&self) -> usize {
        self.records_parsed.load(Ordering::SeqCst)
    }

    /// Skips recorded for a specific reason.
    pub fn skipped_count(&self, reason: SkipReason) -> usize {
        // All SkipReason variants are initialized in new(), so unwrap() is safe
        self.skipped.get(&reason).unwrap().load(Ordering::SeqCst)
    }

    /// Total skipped lines across all reasons.
    pub fn total_skipped(&self) -> usize {
        SkipReason::iter().map(|r| self.skipped_count(r)).sum()
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stats_initialization() {
        let stats = ParseStats::new();
        assert_eq!(stats.lines_read(), 0);
        assert_eq!(stats.records_parsed(), 0);
        for reason in SkipReason::iter() {
            assert_eq!(stats.skipped_count(reason), 0);
        }
    }

    #[test]
    fn test_parse_stats_increment() {
        let stats = ParseStats::new();
        stats.record_line_read();
        stats.record_line_read();
        stats.record_parsed();
        stats.record_skipped(SkipReason::LineFormat);
        assert_eq!(stats.lines_read(), 2);
        assert_eq!(stats.records_parsed(), 1);
        assert_eq!(stats.skipped_count(SkipReason::LineFormat), 1);
        assert_eq!(stats.skipped_count(SkipReason::Timestamp), 0);
        assert_eq!(stats.total_skipped(), 1);
    }

    #[test]
    fn test_skip_reason_labels() {
        assert_eq!(SkipReason::LineFormat.as_str(), "line format mismatch");
        assert_eq!(SkipReason::Timestamp.as_str(), "unparseable timestamp");
    }
}
