//! Core data model: one structured record per parsed access-log line.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::bots::compile_regex;

/// Trailing file extension, e.g. `/assets/app.js` -> `js`.
/// Matched case-sensitively, so `/PAGE.HTML` has no extension.
static EXTENSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"\.([a-z0-9]+)$", "EXTENSION_PATTERN"));

/// A single parsed Combined Log Format line.
///
/// Records are created once by the parser and never mutated afterwards; the
/// derived fields (`date`, `hour`, `is_html`, `file_extension`) are computed
/// from the validated fields at construction time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// Client address exactly as found in the log line.
    pub client_ip: String,
    /// Request time as written in the log (wall clock, offset not applied).
    pub timestamp: NaiveDateTime,
    /// HTTP method token.
    pub method: String,
    /// Request path, unmodified.
    pub path: String,
    /// HTTP status code.
    pub status: u16,
    /// Response size in bytes; the literal `-` maps to 0.
    pub bytes: u64,
    /// Referer header value; may be empty.
    pub referer: String,
    /// Raw User-Agent header value.
    pub user_agent: String,
    /// Matched bot name, if the user agent matched the pattern table.
    pub bot_type: Option<String>,
    /// Whether this request came from a known bot (`bot_type` is present).
    pub is_bot: bool,
    /// Calendar date of the request.
    pub date: NaiveDate,
    /// Hour of day, 0-23.
    pub hour: u32,
    /// Whether the path looks like an HTML page (`.html`, `.htm`, or `/`).
    pub is_html: bool,
    /// Trailing lowercase file extension without the dot, if any.
    pub file_extension: Option<String>,
}

impl LogRecord {
    /// Builds a record from the validated line fields, filling in the
    /// derived columns.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_fields(
        client_ip: String,
        timestamp: NaiveDateTime,
        method: String,
        path: String,
        status: u16,
        bytes: u64,
        referer: String,
        user_agent: String,
        bot_type: Option<String>,
    ) -> Self {
        let is_bot = bot_type.is_some();
        let date = timestamp.date();
        let hour = timestamp.hour();
        let is_html = is_html_path(&path);
        let file_extension = path_extension(&path);
        LogRecord {
            client_ip,
            timestamp,
            method,
            path,
            status,
            bytes,
            referer,
            user_agent,
            bot_type,
            is_bot,
            date,
            hour,
            is_html,
            file_extension,
        }
    }
}

/// Returns true for paths that end in `.html`, `.htm`, or `/`.
pub fn is_html_path(path: &str) -> bool {
    path.ends_with(".html") || path.ends_with(".htm") || path.ends_with('/')
}

/// Extracts the trailing file extension (without the dot) from a path.
pub fn path_extension(path: &str) -> Option<String> {
    EXTENSION_PATTERN
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
