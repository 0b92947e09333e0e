//! Result types for the analytics queries.
//!
//! Each query returns a concrete type; open-ended keys (per-status,
//! per-hour buckets) use ordered maps so iteration is deterministic for
//! display and export. All types serialize, so the export layer can emit
//! them without bespoke glue.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// High-level crawl budget metrics over the whole record collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlBudgetSummary {
    /// All parsed requests.
    pub total_requests: usize,
    /// Requests from known bots.
    pub bot_requests: usize,
    /// Bot share of all requests, percent, rounded to 2 decimals.
    /// Zero when there are no requests at all.
    pub bot_percentage: f64,
    /// Distinct bot types seen.
    pub unique_bots: usize,
    /// Distinct paths crawled by bots.
    pub unique_pages_crawled: usize,
    /// First and last timestamp across the full collection; absent when the
    /// collection is empty.
    pub date_range: Option<DateRange>,
}

/// Rendered first/last timestamps of a record collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
    /// Earliest timestamp, rendered as `YYYY-MM-DD HH:MM:SS`.
    pub start: String,
    /// Latest timestamp, rendered as `YYYY-MM-DD HH:MM:SS`.
    pub end: String,
}

/// Per-bot-type request breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotDistributionRow {
    /// Bot name from the pattern table.
    pub bot_type: String,
    /// Requests from this bot.
    pub total_requests: usize,
    /// Requests that returned status 200.
    pub successful_requests: usize,
    /// Summed response bytes.
    pub total_bytes: u64,
    /// successful/total, percent, rounded to 2 decimals.
    pub success_rate: f64,
}

/// Outcome of the Googlebot deep dive.
///
/// "No bot traffic at all" and "bot traffic present but none of it
/// Googlebot" are distinct states that callers must be able to tell apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GooglebotAnalysis {
    /// The record collection contains no bot traffic.
    NoBotTraffic,
    /// Bots were seen, but none with "googlebot" in the type name.
    NoGooglebotTraffic,
    /// Googlebot traffic was found.
    Report(GooglebotReport),
}

/// Googlebot behavior metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GooglebotReport {
    /// Total Googlebot requests.
    pub total_crawls: usize,
    /// Counts per bot_type variant within the Googlebot subset (captures
    /// mobile vs desktop naming), descending by count.
    pub variants: Vec<BotTypeCount>,
    /// Requests per hour of day; only hours present in the data appear.
    pub crawl_by_hour: BTreeMap<u32, usize>,
    /// The 20 most-crawled paths, descending by count.
    pub top_crawled_paths: Vec<PathCount>,
    /// Requests per HTTP status code.
    pub status_codes: BTreeMap<u16, usize>,
    /// Mean response bytes, rounded to 2 decimals.
    pub avg_response_size: f64,
}

/// A bot type with a request count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotTypeCount {
    /// Bot name.
    pub bot_type: String,
    /// Requests from this bot.
    pub count: usize,
}

/// A path with a crawl count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathCount {
    /// Request path.
    pub path: String,
    /// Crawl requests to this path.
    pub count: usize,
}

/// One row of the bot_type x status cross-tabulation.
///
/// The four summary columns bucket raw codes into [200,300), [300,400),
/// [400,500), and [500,600); codes outside 100-599 appear only in the raw
/// cross-tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCodeRow {
    /// Bot name.
    pub bot_type: String,
    /// Raw counts per status code.
    pub by_status: BTreeMap<u16, usize>,
    /// Requests with a 2xx status.
    pub count_2xx: usize,
    /// Requests with a 3xx status.
    pub count_3xx: usize,
    /// Requests with a 4xx status.
    pub count_4xx: usize,
    /// Requests with a 5xx status.
    pub count_5xx: usize,
}

/// Per-path crawl frequency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathFrequencyRow {
    /// Request path.
    pub path: String,
    /// Bot requests to this path.
    pub crawl_count: usize,
    /// The most frequent bot on this path (first-encountered wins ties).
    pub primary_bot: String,
    /// Share of requests with status 200, percent, rounded to 2 decimals.
    pub success_rate: f64,
}

/// Daily crawl counts, optionally filtered to one bot type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    /// Calendar date.
    pub date: NaiveDate,
    /// Bot requests on this date.
    pub total_crawls: usize,
    /// Bot requests that returned status 200.
    pub successful_crawls: usize,
}

/// Response size statistics over the bot subset.
///
/// Byte size is the documented proxy for response cost; real latency is not
/// inferred.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseSizeStats {
    /// Mean bytes, rounded to 2 decimals.
    pub avg_bytes: f64,
    /// Median bytes (average of the middle pair for even-sized subsets),
    /// rounded to 2 decimals.
    pub median_bytes: f64,
    /// Largest response.
    pub max_bytes: u64,
    /// Smallest response.
    pub min_bytes: u64,
    /// Total bytes served to bots.
    pub total_bandwidth: u64,
}

/// A path returning a specific error status to bots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPageRow {
    /// Request path.
    pub path: String,
    /// Times the path returned the error status to a bot.
    pub error_count: usize,
    /// Distinct bot types affected, in order of first encounter.
    pub bots_affected: Vec<String>,
}

/// One date of the daily crawl report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCrawlRow {
    /// Calendar date.
    pub date: NaiveDate,
    /// Bot requests on this date.
    pub total_crawls: usize,
    /// Requests with status 200.
    pub successful: usize,
    /// Requests with a 4xx status.
    pub errors_4xx: usize,
    /// Requests with a 5xx status.
    pub errors_5xx: usize,
    /// Distinct bot types active on this date.
    pub unique_bots: usize,
    /// Summed response bytes.
    pub total_bytes: u64,
}
