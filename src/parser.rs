//! Combined Log Format line parser.
//!
//! Turns raw access-log text into [`LogRecord`]s and classifies each
//! record's originating bot. Malformed lines are an expected input, not an
//! error: they simply produce no record, and a fully-malformed input yields
//! an empty batch.

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

use crate::bots::{compile_regex, BotPatternTable};
use crate::error_handling::SkipReason;
use crate::models::LogRecord;

/// Primary timestamp format: `02/Jan/2025:14:03:27 +0000`.
const TIMESTAMP_WITH_OFFSET: &str = "%d/%b/%Y:%H:%M:%S %z";
/// Fallback for logs written without a UTC offset.
const TIMESTAMP_WITHOUT_OFFSET: &str = "%d/%b/%Y:%H:%M:%S";

/// Combined Log Format:
/// `IP - - [timestamp] "METHOD PATH HTTP/x.y" status bytes "referer" "user-agent"`.
///
/// Any structural deviation (missing quotes, malformed request line,
/// non-numeric status) fails the whole match.
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(
        concat!(
            r"^(?P<ip>[\d.]+) ",
            r"- - ",
            r"\[(?P<timestamp>[^\]]+)\] ",
            r#""(?P<method>\w+) (?P<path>[^\s]+) HTTP/[\d.]+" "#,
            r"(?P<status>\d+) ",
            r"(?P<bytes>\d+|-) ",
            r#""(?P<referer>[^"]*)" "#,
            r#""(?P<user_agent>[^"]*)""#,
        ),
        "LINE_PATTERN",
    )
});

/// Parses Combined Log Format lines and tags each record with its bot
/// identity.
///
/// The parser holds only the immutable [`BotPatternTable`], so a single
/// instance can be shared freely across threads.
pub struct LogParser {
    bots: BotPatternTable,
}

impl LogParser {
    /// Creates a parser with the builtin bot table.
    pub fn new() -> Self {
        LogParser {
            bots: BotPatternTable::builtin(),
        }
    }

    /// Creates a parser with a caller-supplied bot table.
    pub fn with_bot_table(bots: BotPatternTable) -> Self {
        LogParser { bots }
    }

    /// The bot table used for classification.
    pub fn bot_table(&self) -> &BotPatternTable {
        &self.bots
    }

    /// Parses one line, returning `None` on any structural or timestamp
    /// failure.
    pub fn parse_line(&self, line: &str) -> Option<LogRecord> {
        self.try_parse_line(line).ok()
    }

    /// Parses one line, reporting which stage rejected it.
    ///
    /// The [`SkipReason`] is a classification for statistics, not a failure
    /// of the batch: callers that don't care use [`LogParser::parse_line`].
    pub fn try_parse_line(&self, line: &str) -> Result<LogRecord, SkipReason> {
        let caps = LINE_PATTERN.captures(line).ok_or(SkipReason::LineFormat)?;

        let timestamp = parse_timestamp(&caps["timestamp"]).ok_or(SkipReason::Timestamp)?;

        // The grammar guarantees digits here; a status wider than u16 (or a
        // byte count wider than u64) is treated like any other malformed line.
        let status: u16 = caps["status"]
            .parse()
            .map_err(|_| SkipReason::LineFormat)?;
        let bytes_field = &caps["bytes"];
        let bytes: u64 = if bytes_field == "-" {
            0
        } else {
            bytes_field.parse().map_err(|_| SkipReason::LineFormat)?
        };

        let user_agent = caps["user_agent"].to_string();
        let bot_type = self.bots.classify(&user_agent).map(str::to_string);

        Ok(LogRecord::from_fields(
            caps["ip"].to_string(),
            timestamp,
            caps["method"].to_string(),
            caps["path"].to_string(),
            status,
            bytes,
            caps["referer"].to_string(),
            user_agent,
            bot_type,
        ))
    }

    /// Parses a batch of lines in order.
    ///
    /// `limit` counts lines examined, not lines successfully parsed; `None`
    /// means unlimited. Unparseable lines are skipped silently, and the
    /// relative order of parsed records matches the input. The iterator is
    /// consumed lazily, so arbitrarily large inputs never need to be
    /// buffered ahead of time.
    pub fn parse_many<I, S>(&self, lines: I, limit: Option<usize>) -> Vec<LogRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records = Vec::new();
        for (examined, line) in lines.into_iter().enumerate() {
            if let Some(max) = limit {
                if examined >= max {
                    break;
                }
            }
            if let Some(record) = self.parse_line(line.as_ref().trim()) {
                records.push(record);
            }
        }
        records
    }
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a bracketed-field timestamp.
///
/// Tries the offset-bearing format first; on failure, retries with only the
/// portion before the first whitespace and no offset. No other formats are
/// attempted. The record keeps the wall-clock time as written in the log;
/// a present offset is validated but not applied.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_str(raw, TIMESTAMP_WITH_OFFSET) {
        return Some(dt.naive_local());
    }
    let head = raw.split_whitespace().next()?;
    NaiveDateTime::parse_from_str(head, TIMESTAMP_WITHOUT_OFFSET).ok()
}
