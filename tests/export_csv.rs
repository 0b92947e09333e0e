//! Tests for CSV/JSON export functionality.

use tempfile::TempDir;

use crawl_budget::export::{
    export_bot_distribution_csv, export_daily_report_csv, export_path_frequency_csv,
    export_summary_json,
};
use crawl_budget::{CrawlAnalytics, LogParser};

#[path = "helpers.rs"]
mod helpers;

use helpers::{get_line, log_line, BINGBOT_UA, GOOGLEBOT_UA};

fn sample_analytics() -> CrawlAnalytics {
    let parser = LogParser::new();
    let lines = vec![
        log_line("66.249.66.1", "01/Dec/2024:08:00:00 +0000", "GET", "/a", 200, "100", GOOGLEBOT_UA),
        log_line("66.249.66.1", "01/Dec/2024:09:00:00 +0000", "GET", "/a", 404, "0", GOOGLEBOT_UA),
        log_line("40.77.167.1", "02/Dec/2024:10:00:00 +0000", "GET", "/b", 200, "50", BINGBOT_UA),
    ];
    CrawlAnalytics::new(parser.parse_many(&lines, None))
}

#[test]
fn test_export_bot_distribution_csv() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("bot_distribution.csv");

    let rows = sample_analytics().bot_distribution();
    let written = export_bot_distribution_csv(&rows, Some(&path)).expect("export should succeed");
    assert_eq!(written, 2);

    let content = std::fs::read_to_string(&path).expect("Failed to read exported CSV");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("bot_type,total_requests,successful_requests,total_bytes,success_rate")
    );
    assert_eq!(lines.next(), Some("googlebot,2,1,100,50.00"));
    assert_eq!(lines.next(), Some("bingbot,1,1,50,100.00"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_export_daily_report_csv() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("daily_report.csv");

    let rows = sample_analytics().daily_crawl_report();
    let written = export_daily_report_csv(&rows, Some(&path)).expect("export should succeed");
    assert_eq!(written, 2);

    let content = std::fs::read_to_string(&path).expect("Failed to read exported CSV");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("date,total_crawls,successful,errors_4xx,errors_5xx,unique_bots,total_bytes")
    );
    assert_eq!(lines.next(), Some("2024-12-01,2,1,1,0,1,100"));
    assert_eq!(lines.next(), Some("2024-12-02,1,1,0,0,1,50"));
}

#[test]
fn test_export_path_frequency_csv() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("path_frequency.csv");

    let rows = sample_analytics().crawl_frequency_by_path(1);
    let written = export_path_frequency_csv(&rows, Some(&path)).expect("export should succeed");
    assert_eq!(written, 2);

    let content = std::fs::read_to_string(&path).expect("Failed to read exported CSV");
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("path,crawl_count,primary_bot,success_rate"));
    assert_eq!(lines.next(), Some("/a,2,googlebot,50.00"));
    assert_eq!(lines.next(), Some("/b,1,bingbot,100.00"));
}

#[test]
fn test_export_empty_tables() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("empty.csv");

    let analytics = CrawlAnalytics::new(Vec::new());
    let written = export_bot_distribution_csv(&analytics.bot_distribution(), Some(&path))
        .expect("empty export should succeed");
    assert_eq!(written, 0);

    // Header only
    let content = std::fs::read_to_string(&path).expect("Failed to read exported CSV");
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn test_export_summary_json() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("summary.json");

    let summary = sample_analytics().crawl_budget_summary();
    export_summary_json(&summary, Some(&path)).expect("export should succeed");

    let content = std::fs::read_to_string(&path).expect("Failed to read exported JSON");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("should be valid JSON");
    assert_eq!(parsed["total_requests"], 3);
    assert_eq!(parsed["bot_requests"], 3);
    assert_eq!(parsed["bot_percentage"], 100.0);
    assert_eq!(parsed["date_range"]["start"], "2024-12-01 08:00:00");
}

#[test]
fn test_export_to_unwritable_path_errors() {
    let rows = sample_analytics().bot_distribution();
    let result =
        export_bot_distribution_csv(&rows, Some(std::path::Path::new("/nonexistent/dir/out.csv")));
    assert!(result.is_err());
}

#[tokio::test]
async fn test_run_report_writes_export_tables() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let out = dir.path().join("report");

    let lines = vec![get_line("/a", 200, "100", GOOGLEBOT_UA)];
    let file = helpers::write_temp_log(&lines);

    let config = crawl_budget::Config {
        file: file.path().to_path_buf(),
        output_dir: Some(out.clone()),
        ..Default::default()
    };
    crawl_budget::run_report(config).await.expect("run should succeed");

    assert!(out.join("bot_distribution.csv").exists());
    assert!(out.join("daily_report.csv").exists());
    assert!(out.join("path_frequency.csv").exists());
    assert!(out.join("summary.json").exists());
}
