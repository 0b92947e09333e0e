//! End-to-end tests: log file -> run_report -> counters, and
//! parse -> analytics pipelines over in-memory lines.

use std::path::PathBuf;

use crawl_budget::analytics::GooglebotAnalysis;
use crawl_budget::{run_report, Config, CrawlAnalytics, LogParser};

#[path = "helpers.rs"]
mod helpers;

use helpers::{get_line, log_line, write_temp_log, BINGBOT_UA, BROWSER_UA, GOOGLEBOT_UA};

#[tokio::test]
async fn test_run_report_counts() {
    let lines = vec![
        get_line("/index.html", 200, "5120", GOOGLEBOT_UA),
        get_line("/about.html", 200, "2048", BROWSER_UA),
        "this line is garbage".to_string(),
        get_line("/missing", 404, "-", BINGBOT_UA),
    ];
    let file = write_temp_log(&lines);

    let config = Config {
        file: file.path().to_path_buf(),
        ..Default::default()
    };
    let report = run_report(config).await.expect("run should succeed");

    assert_eq!(report.lines_read, 4);
    assert_eq!(report.records_parsed, 3);
    assert_eq!(report.lines_skipped, 1);
    assert_eq!(report.bot_records, 2);
    assert!(report.elapsed_seconds >= 0.0);
}

#[tokio::test]
async fn test_run_report_limit_counts_examined_lines() {
    let lines = vec![
        "garbage".to_string(),
        get_line("/a", 200, "10", GOOGLEBOT_UA),
        get_line("/b", 200, "10", GOOGLEBOT_UA),
    ];
    let file = write_temp_log(&lines);

    let config = Config {
        file: file.path().to_path_buf(),
        limit: Some(2),
        ..Default::default()
    };
    let report = run_report(config).await.expect("run should succeed");

    assert_eq!(report.lines_read, 2);
    assert_eq!(report.records_parsed, 1);
    assert_eq!(report.lines_skipped, 1);
}

#[tokio::test]
async fn test_run_report_empty_file_is_valid() {
    let file = write_temp_log(&[]);
    let config = Config {
        file: file.path().to_path_buf(),
        ..Default::default()
    };
    let report = run_report(config).await.expect("empty input is not an error");
    assert_eq!(report.lines_read, 0);
    assert_eq!(report.records_parsed, 0);
    assert_eq!(report.bot_records, 0);
}

#[tokio::test]
async fn test_run_report_missing_file_errors() {
    let config = Config {
        file: PathBuf::from("/nonexistent/access.log"),
        ..Default::default()
    };
    let result = run_report(config).await;
    assert!(result.is_err());
}

#[test]
fn test_parse_and_analyze_pipeline() {
    let parser = LogParser::new();
    let lines = vec![
        log_line("66.249.66.1", "01/Dec/2024:08:00:00 +0000", "GET", "/x", 200, "100", GOOGLEBOT_UA),
        log_line("66.249.66.1", "01/Dec/2024:09:00:00 +0000", "GET", "/x", 200, "100", GOOGLEBOT_UA),
        log_line("66.249.66.2", "01/Dec/2024:10:00:00 +0000", "GET", "/x", 404, "0", GOOGLEBOT_UA),
        log_line("40.77.167.1", "02/Dec/2024:11:00:00 +0000", "GET", "/y", 200, "50", BINGBOT_UA),
        log_line("10.0.0.1", "02/Dec/2024:12:00:00 +0000", "GET", "/y", 200, "50", BROWSER_UA),
    ];
    let records = parser.parse_many(&lines, None);
    assert_eq!(records.len(), 5);

    let analytics = CrawlAnalytics::new(records);
    let summary = analytics.crawl_budget_summary();
    assert_eq!(summary.total_requests, 5);
    assert_eq!(summary.bot_requests, 4);
    assert_eq!(summary.bot_percentage, 80.0);
    assert_eq!(summary.unique_bots, 2);

    let frequency = analytics.crawl_frequency_by_path(1);
    assert_eq!(frequency[0].path, "/x");
    assert_eq!(frequency[0].crawl_count, 3);
    assert_eq!(frequency[0].success_rate, 66.67);
    assert_eq!(frequency[1].path, "/y");
    assert_eq!(frequency[1].success_rate, 100.0);

    let GooglebotAnalysis::Report(report) = analytics.googlebot_analysis() else {
        panic!("expected googlebot traffic");
    };
    assert_eq!(report.total_crawls, 3);

    let series = analytics.time_series_analysis(None);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].total_crawls, 3);
    assert_eq!(series[1].total_crawls, 1);
}

#[test]
fn test_order_preserved_from_parse_through_aggregation() {
    // bingbot appears first; under tied counts it must stay first.
    let parser = LogParser::new();
    let lines = vec![
        get_line("/a", 200, "10", BINGBOT_UA),
        get_line("/b", 200, "10", GOOGLEBOT_UA),
    ];
    let analytics = CrawlAnalytics::new(parser.parse_many(&lines, None));
    let distribution = analytics.bot_distribution();
    assert_eq!(distribution[0].bot_type, "bingbot");
    assert_eq!(distribution[1].bot_type, "googlebot");
}
