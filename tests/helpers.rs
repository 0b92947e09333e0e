// Shared test helpers for building log lines and temp log files.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::io::Write;
use tempfile::NamedTempFile;

/// Well-known user agents for tests.
#[allow(dead_code)] // Used by other test files
pub const GOOGLEBOT_UA: &str =
    "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";
#[allow(dead_code)]
pub const BINGBOT_UA: &str =
    "Mozilla/5.0 (compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)";
#[allow(dead_code)]
pub const BROWSER_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Builds one Combined Log Format line.
#[allow(dead_code)] // Used by other test files
pub fn log_line(
    ip: &str,
    timestamp: &str,
    method: &str,
    path: &str,
    status: u16,
    bytes: &str,
    user_agent: &str,
) -> String {
    format!(
        "{} - - [{}] \"{} {} HTTP/1.1\" {} {} \"-\" \"{}\"",
        ip, timestamp, method, path, status, bytes, user_agent
    )
}

/// Builds a GET line with fixed IP and timestamp, varying what matters.
#[allow(dead_code)] // Used by other test files
pub fn get_line(path: &str, status: u16, bytes: &str, user_agent: &str) -> String {
    log_line(
        "66.249.66.1",
        "01/Dec/2024:10:30:45 +0000",
        "GET",
        path,
        status,
        bytes,
        user_agent,
    )
}

/// Writes lines to a temp file and returns the handle (file is deleted on drop).
#[allow(dead_code)] // Used by other test files
pub fn write_temp_log(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp log file");
    for line in lines {
        writeln!(file, "{}", line).expect("Failed to write temp log line");
    }
    file.flush().expect("Failed to flush temp log file");
    file
}
