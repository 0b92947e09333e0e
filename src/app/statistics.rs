//! Console report rendering and parse statistics printing.

use colored::*;
use log::info;
use strum::IntoEnumIterator;

use crate::analytics::{CrawlAnalytics, GooglebotAnalysis};
use crate::config::Config;
use crate::error_handling::{ParseStats, SkipReason};

const BANNER_WIDTH: usize = 60;

fn print_banner(title: &str) {
    println!("\n{}", "=".repeat(BANNER_WIDTH));
    println!("{}", title.bold());
    println!("{}", "=".repeat(BANNER_WIDTH));
}

/// Prints the sectioned crawl-budget report to stdout.
///
/// Sections mirror the analytics queries: summary, bot distribution,
/// Googlebot deep dive, crawl traps, and error pages. Thresholds come from
/// the provided [`Config`].
pub fn print_report(analytics: &CrawlAnalytics, config: &Config) {
    print_banner("CRAWL BUDGET SUMMARY");
    let summary = analytics.crawl_budget_summary();
    println!("Total requests:       {}", summary.total_requests);
    println!("Bot requests:         {}", summary.bot_requests);
    println!("Bot percentage:       {:.2}%", summary.bot_percentage);
    println!("Unique bots:          {}", summary.unique_bots);
    println!("Unique pages crawled: {}", summary.unique_pages_crawled);
    match &summary.date_range {
        Some(range) => println!("Date range:           {} .. {}", range.start, range.end),
        None => println!("Date range:           (no data)"),
    }

    print_banner("BOT DISTRIBUTION");
    let distribution = analytics.bot_distribution();
    if distribution.is_empty() {
        println!("No bot traffic detected");
    } else {
        println!(
            "{:<20} {:>10} {:>12} {:>14} {:>10}",
            "bot", "requests", "successful", "bytes", "success%"
        );
        for row in &distribution {
            println!(
                "{:<20} {:>10} {:>12} {:>14} {:>10.2}",
                row.bot_type,
                row.total_requests,
                row.successful_requests,
                row.total_bytes,
                row.success_rate
            );
        }
    }

    print_banner("GOOGLEBOT ANALYSIS");
    match analytics.googlebot_analysis() {
        GooglebotAnalysis::NoBotTraffic => println!("No bot activity found"),
        GooglebotAnalysis::NoGooglebotTraffic => println!("No Googlebot activity found"),
        GooglebotAnalysis::Report(report) => {
            println!("Total crawls:          {}", report.total_crawls);
            println!("Average response size: {:.2} bytes", report.avg_response_size);
            println!("\nVariants:");
            for variant in &report.variants {
                println!("  {}: {}", variant.bot_type, variant.count);
            }
            println!("\nTop crawled paths:");
            for entry in report.top_crawled_paths.iter().take(5) {
                println!("  {}: {} crawls", entry.path, entry.count);
            }
        }
    }

    print_banner("STATUS CODES (BOT TRAFFIC)");
    let status_rows = analytics.status_code_analysis();
    if status_rows.is_empty() {
        println!("No bot traffic detected");
    } else {
        println!(
            "{:<20} {:>6} {:>6} {:>6} {:>6}",
            "bot", "2xx", "3xx", "4xx", "5xx"
        );
        for row in &status_rows {
            println!(
                "{:<20} {:>6} {:>6} {:>6} {:>6}",
                row.bot_type, row.count_2xx, row.count_3xx, row.count_4xx, row.count_5xx
            );
        }
    }

    match config.bot.as_deref() {
        Some(bot) => print_banner(&format!("DAILY CRAWL ACTIVITY ({})", bot)),
        None => print_banner("DAILY CRAWL ACTIVITY"),
    }
    let series = analytics.time_series_analysis(config.bot.as_deref());
    if series.is_empty() {
        println!("No crawl activity");
    } else {
        for point in &series {
            println!(
                "{}: {} crawls ({} successful)",
                point.date, point.total_crawls, point.successful_crawls
            );
        }
    }

    print_banner("RESPONSE SIZES (BOT TRAFFIC)");
    match analytics.response_size_analysis() {
        None => println!("No bot data available"),
        Some(stats) => {
            println!("Average: {:.2} bytes", stats.avg_bytes);
            println!("Median:  {:.2} bytes", stats.median_bytes);
            println!("Min/max: {} / {} bytes", stats.min_bytes, stats.max_bytes);
            println!("Total:   {} bytes", stats.total_bandwidth);
        }
    }

    print_banner(&format!(
        "POTENTIAL CRAWL TRAPS (>{} crawls)",
        config.trap_threshold
    ));
    let traps = analytics.identify_crawl_traps(config.trap_threshold);
    if traps.is_empty() {
        println!("No crawl traps detected");
    } else {
        for (i, trap) in traps.iter().take(10).enumerate() {
            println!("{}. {}", i + 1, trap);
        }
    }

    print_banner(&format!("{} ERRORS", config.error_status));
    let errors = analytics.get_error_pages(config.error_status);
    if errors.is_empty() {
        println!("No {} errors found", config.error_status);
    } else {
        for row in errors.iter().take(10) {
            println!(
                "{} ({} hits, bots: {})",
                row.path,
                row.error_count,
                row.bots_affected.join(", ")
            );
        }
    }

    println!();
}

/// Logs the parse counters, including a per-reason skip breakdown.
pub fn print_parse_statistics(stats: &ParseStats) {
    info!(
        "Parse statistics: read={}, parsed={}, skipped={}",
        stats.lines_read(),
        stats.records_parsed(),
        stats.total_skipped()
    );
    if stats.total_skipped() > 0 {
        for reason in SkipReason::iter() {
            let count = stats.skipped_count(reason);
            if count > 0 {
                info!("   {}: {}", reason.as_str(), count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LogParser;

    fn sample_analytics() -> CrawlAnalytics {
        let parser = LogParser::new();
        let lines = [
            "10.0.0.1 - - [01/Dec/2024:10:00:00 +0000] \"GET /a HTTP/1.1\" 200 100 \"-\" \"Mozilla/5.0 (compatible; Googlebot/2.1)\"",
            "10.0.0.2 - - [01/Dec/2024:11:00:00 +0000] \"GET /b HTTP/1.1\" 404 0 \"-\" \"Mozilla/5.0 (compatible; bingbot/2.0)\"",
        ];
        CrawlAnalytics::new(parser.parse_many(lines, None))
    }

    #[test]
    fn test_print_report_does_not_panic() {
        print_report(&sample_analytics(), &Config::default());
    }

    #[test]
    fn test_print_report_empty_engine() {
        print_report(&CrawlAnalytics::new(Vec::new()), &Config::default());
    }

    #[test]
    fn test_print_parse_statistics_no_skips() {
        let stats = ParseStats::new();
        print_parse_statistics(&stats);
    }

    #[test]
    fn test_print_parse_statistics_with_skips() {
        let stats = ParseStats::new();
        stats.record_line_read();
        stats.record_skipped(SkipReason::LineFormat);
        print_parse_statistics(&stats);
    }
}
