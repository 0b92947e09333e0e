//! Crawl-budget analytics over parsed log records.
//!
//! [`CrawlAnalytics`] is constructed once from an ordered record collection
//! and answers a fixed set of aggregation queries. The bot-only view is
//! derived a single time at construction; every query is a pure function of
//! the held records, so concurrent read-only queries against one engine are
//! safe.
//!
//! Grouping is stable throughout: whenever a representative value must be
//! picked under a tie (the "primary bot" of a path, ordering of equal-count
//! rows), the winner is the value first encountered in the original record
//! order.

mod types;

pub use types::{
    BotDistributionRow, BotTypeCount, CrawlBudgetSummary, DailyCrawlRow, DateRange, ErrorPageRow,
    GooglebotAnalysis, GooglebotReport, PathCount, PathFrequencyRow, ResponseSizeStats,
    StatusCodeRow, TimeSeriesPoint,
};

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

use crate::config::TOP_CRAWLED_PATHS_LIMIT;
use crate::models::LogRecord;

/// Rounds to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Grouping that remembers the order in which keys were first seen.
///
/// `HashMap` iteration order would leak randomness into tie-breaks; this
/// keeps the first-encountered order that the queries are specified against.
struct OrderedGroups<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K: Eq + Hash + Clone, V> OrderedGroups<K, V> {
    fn new() -> Self {
        OrderedGroups {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn entry_or(&mut self, key: &K, default: impl FnOnce() -> V) -> &mut V {
        let pos = match self.index.get(key) {
            Some(&pos) => pos,
            None => {
                let pos = self.entries.len();
                self.index.insert(key.clone(), pos);
                self.entries.push((key.clone(), default()));
                pos
            }
        };
        &mut self.entries[pos].1
    }

    fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

/// The analytics engine.
///
/// Holds the full ordered record collection plus an index of the bot-only
/// subset computed once at construction. Records are immutable after parse
/// time and nothing here mutates them; results are computed fresh on every
/// call.
pub struct CrawlAnalytics {
    records: Vec<LogRecord>,
    bot_indices: Vec<usize>,
}

impl CrawlAnalytics {
    /// Builds the engine from an ordered record collection.
    pub fn new(records: Vec<LogRecord>) -> Self {
        let bot_indices = records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_bot)
            .map(|(i, _)| i)
            .collect();
        CrawlAnalytics {
            records,
            bot_indices,
        }
    }

    /// All parsed records, in original order.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Number of bot records.
    pub fn bot_record_count(&self) -> usize {
        self.bot_indices.len()
    }

    fn bot_records(&self) -> impl Iterator<Item = &LogRecord> {
        self.bot_indices.iter().map(|&i| &self.records[i])
    }

    /// High-level crawl budget metrics.
    ///
    /// The date range spans the full collection, not just bot records, and
    /// is absent when the collection is empty.
    pub fn crawl_budget_summary(&self) -> CrawlBudgetSummary {
        let total_requests = self.records.len();
        let bot_requests = self.bot_indices.len();
        let bot_percentage = if total_requests > 0 {
            round2(bot_requests as f64 / total_requests as f64 * 100.0)
        } else {
            0.0
        };

        let unique_bots = self
            .bot_records()
            .filter_map(|r| r.bot_type.as_deref())
            .collect::<HashSet<_>>()
            .len();
        let unique_pages_crawled = self
            .bot_records()
            .map(|r| r.path.as_str())
            .collect::<HashSet<_>>()
            .len();

        let date_range = match (
            self.records.iter().map(|r| r.timestamp).min(),
            self.records.iter().map(|r| r.timestamp).max(),
        ) {
            (Some(start), Some(end)) => Some(DateRange {
                start: start.format("%Y-%m-%d %H:%M:%S").to_string(),
                end: end.format("%Y-%m-%d %H:%M:%S").to_string(),
            }),
            _ => None,
        };

        CrawlBudgetSummary {
            total_requests,
            bot_requests,
            bot_percentage,
            unique_bots,
            unique_pages_crawled,
            date_range,
        }
    }

    /// Request breakdown per bot type, descending by request count.
    pub fn bot_distribution(&self) -> Vec<BotDistributionRow> {
        struct Agg {
            total: usize,
            successful: usize,
            bytes: u64,
        }

        let mut groups: OrderedGroups<String, Agg> = OrderedGroups::new();
        for record in self.bot_records() {
            let Some(bot) = record.bot_type.as_ref() else {
                continue;
            };
            let agg = groups.entry_or(bot, || Agg {
                total: 0,
                successful: 0,
                bytes: 0,
            });
            agg.total += 1;
            if record.status == 200 {
                agg.successful += 1;
            }
            agg.bytes += record.bytes;
        }

        let mut rows: Vec<BotDistributionRow> = groups
            .into_entries()
            .into_iter()
            .map(|(bot_type, agg)| BotDistributionRow {
                bot_type,
                total_requests: agg.total,
                successful_requests: agg.successful,
                total_bytes: agg.bytes,
                success_rate: round2(agg.successful as f64 / agg.total as f64 * 100.0),
            })
            .collect();
        // Stable sort keeps first-encountered order for equal counts.
        rows.sort_by(|a, b| b.total_requests.cmp(&a.total_requests));
        rows
    }

    /// Deep dive into Googlebot behavior.
    ///
    /// Restricted to bot records whose type contains "googlebot"
    /// (case-insensitive). Distinguishes an empty bot subset from bot
    /// traffic with no Googlebot in it.
    pub fn googlebot_analysis(&self) -> GooglebotAnalysis {
        if self.bot_indices.is_empty() {
            return GooglebotAnalysis::NoBotTraffic;
        }

        let subset: Vec<&LogRecord> = self
            .bot_records()
            .filter(|r| {
                r.bot_type
                    .as_deref()
                    .is_some_and(|b| b.to_lowercase().contains("googlebot"))
            })
            .collect();
        if subset.is_empty() {
            return GooglebotAnalysis::NoGooglebotTraffic;
        }

        let mut variant_groups: OrderedGroups<String, usize> = OrderedGroups::new();
        let mut crawl_by_hour: BTreeMap<u32, usize> = BTreeMap::new();
        let mut path_groups: OrderedGroups<String, usize> = OrderedGroups::new();
        let mut status_codes: BTreeMap<u16, usize> = BTreeMap::new();
        let mut total_bytes: u64 = 0;

        for record in &subset {
            if let Some(bot) = record.bot_type.as_ref() {
                *variant_groups.entry_or(bot, || 0) += 1;
            }
            *crawl_by_hour.entry(record.hour).or_insert(0) += 1;
            *path_groups.entry_or(&record.path, || 0) += 1;
            *status_codes.entry(record.status).or_insert(0) += 1;
            total_bytes += record.bytes;
        }

        let mut variants: Vec<BotTypeCount> = variant_groups
            .into_entries()
            .into_iter()
            .map(|(bot_type, count)| BotTypeCount { bot_type, count })
            .collect();
        variants.sort_by(|a, b| b.count.cmp(&a.count));

        let mut top_crawled_paths: Vec<PathCount> = path_groups
            .into_entries()
            .into_iter()
            .map(|(path, count)| PathCount { path, count })
            .collect();
        top_crawled_paths.sort_by(|a, b| b.count.cmp(&a.count));
        top_crawled_paths.truncate(TOP_CRAWLED_PATHS_LIMIT);

        GooglebotAnalysis::Report(GooglebotReport {
            total_crawls: subset.len(),
            variants,
            crawl_by_hour,
            top_crawled_paths,
            status_codes,
            avg_response_size: round2(total_bytes as f64 / subset.len() as f64),
        })
    }

    /// Bot_type x status cross-tabulation with 2xx/3xx/4xx/5xx summary
    /// columns. Rows appear in first-encountered bot order.
    pub fn status_code_analysis(&self) -> Vec<StatusCodeRow> {
        struct Agg {
            by_status: BTreeMap<u16, usize>,
            count_2xx: usize,
            count_3xx: usize,
            count_4xx: usize,
            count_5xx: usize,
        }

        let mut groups: OrderedGroups<String, Agg> = OrderedGroups::new();
        for record in self.bot_records() {
            let Some(bot) = record.bot_type.as_ref() else {
                continue;
            };
            let agg = groups.entry_or(bot, || Agg {
                by_status: BTreeMap::new(),
                count_2xx: 0,
                count_3xx: 0,
                count_4xx: 0,
                count_5xx: 0,
            });
            *agg.by_status.entry(record.status).or_insert(0) += 1;
            match record.status {
                200..=299 => agg.count_2xx += 1,
                300..=399 => agg.count_3xx += 1,
                400..=499 => agg.count_4xx += 1,
                500..=599 => agg.count_5xx += 1,
                // Codes outside 100-599 stay in the raw cross-tab only.
                _ => {}
            }
        }

        groups
            .into_entries()
            .into_iter()
            .map(|(bot_type, agg)| StatusCodeRow {
                bot_type,
                by_status: agg.by_status,
                count_2xx: agg.count_2xx,
                count_3xx: agg.count_3xx,
                count_4xx: agg.count_4xx,
                count_5xx: agg.count_5xx,
            })
            .collect()
    }

    /// Most frequently crawled paths, descending by crawl count.
    ///
    /// Paths with fewer than `min_crawls` bot requests are dropped. The
    /// primary bot is the most frequent bot on the path; ties go to the bot
    /// first encountered.
    pub fn crawl_frequency_by_path(&self, min_crawls: usize) -> Vec<PathFrequencyRow> {
        struct Agg {
            count: usize,
            successful: usize,
            bots: OrderedGroups<String, usize>,
        }

        let mut groups: OrderedGroups<String, Agg> = OrderedGroups::new();
        for record in self.bot_records() {
            let agg = groups.entry_or(&record.path, || Agg {
                count: 0,
                successful: 0,
                bots: OrderedGroups::new(),
            });
            agg.count += 1;
            if record.status == 200 {
                agg.successful += 1;
            }
            if let Some(bot) = record.bot_type.as_ref() {
                *agg.bots.entry_or(bot, || 0) += 1;
            }
        }

        let mut rows: Vec<PathFrequencyRow> = groups
            .into_entries()
            .into_iter()
            .filter(|(_, agg)| agg.count >= min_crawls)
            .map(|(path, agg)| {
                let mut primary_bot = String::new();
                let mut best = 0usize;
                for (bot, count) in agg.bots.into_entries() {
                    // Strictly-greater keeps the first-encountered bot on ties.
                    if count > best {
                        best = count;
                        primary_bot = bot;
                    }
                }
                PathFrequencyRow {
                    path,
                    crawl_count: agg.count,
                    primary_bot,
                    success_rate: round2(agg.successful as f64 / agg.count as f64 * 100.0),
                }
            })
            .collect();
        rows.sort_by(|a, b| b.crawl_count.cmp(&a.crawl_count));
        rows
    }

    /// Paths whose bot-request count strictly exceeds `threshold`.
    pub fn identify_crawl_traps(&self, threshold: usize) -> Vec<String> {
        let mut counts: OrderedGroups<String, usize> = OrderedGroups::new();
        for record in self.bot_records() {
            *counts.entry_or(&record.path, || 0) += 1;
        }
        counts
            .into_entries()
            .into_iter()
            .filter(|(_, count)| *count > threshold)
            .map(|(path, _)| path)
            .collect()
    }

    /// Daily crawl activity, dates ascending.
    ///
    /// `bot_type` restricts the series to one bot (exact name match); `None`
    /// covers the whole bot subset.
    pub fn time_series_analysis(&self, bot_type: Option<&str>) -> Vec<TimeSeriesPoint> {
        let mut by_date: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
        for record in self.bot_records() {
            if let Some(wanted) = bot_type {
                if record.bot_type.as_deref() != Some(wanted) {
                    continue;
                }
            }
            let entry = by_date.entry(record.date).or_insert((0, 0));
            entry.0 += 1;
            if record.status == 200 {
                entry.1 += 1;
            }
        }
        by_date
            .into_iter()
            .map(|(date, (total_crawls, successful_crawls))| TimeSeriesPoint {
                date,
                total_crawls,
                successful_crawls,
            })
            .collect()
    }

    /// Response size statistics over the bot subset, `None` when the subset
    /// is empty. Size serves as the documented proxy for response cost.
    pub fn response_size_analysis(&self) -> Option<ResponseSizeStats> {
        let mut sizes: Vec<u64> = self.bot_records().map(|r| r.bytes).collect();
        if sizes.is_empty() {
            return None;
        }
        sizes.sort_unstable();

        let n = sizes.len();
        let total: u64 = sizes.iter().sum();
        let median = if n % 2 == 1 {
            sizes[n / 2] as f64
        } else {
            (sizes[n / 2 - 1] as f64 + sizes[n / 2] as f64) / 2.0
        };

        Some(ResponseSizeStats {
            avg_bytes: round2(total as f64 / n as f64),
            median_bytes: round2(median),
            max_bytes: sizes[n - 1],
            min_bytes: sizes[0],
            total_bandwidth: total,
        })
    }

    /// Paths returning `status_code` to bots, descending by occurrence
    /// count. Affected bots are deduplicated in first-encounter order.
    pub fn get_error_pages(&self, status_code: u16) -> Vec<ErrorPageRow> {
        struct Agg {
            count: usize,
            bots: Vec<String>,
        }

        let mut groups: OrderedGroups<String, Agg> = OrderedGroups::new();
        for record in self.bot_records() {
            if record.status != status_code {
                continue;
            }
            let agg = groups.entry_or(&record.path, || Agg {
                count: 0,
                bots: Vec::new(),
            });
            agg.count += 1;
            if let Some(bot) = record.bot_type.as_ref() {
                if !agg.bots.iter().any(|b| b == bot) {
                    agg.bots.push(bot.clone());
                }
            }
        }

        let mut rows: Vec<ErrorPageRow> = groups
            .into_entries()
            .into_iter()
            .map(|(path, agg)| ErrorPageRow {
                path,
                error_count: agg.count,
                bots_affected: agg.bots,
            })
            .collect();
        rows.sort_by(|a, b| b.error_count.cmp(&a.error_count));
        rows
    }

    /// Per-date summary over the bot subset, dates ascending.
    pub fn daily_crawl_report(&self) -> Vec<DailyCrawlRow> {
        struct Agg {
            total: usize,
            successful: usize,
            errors_4xx: usize,
            errors_5xx: usize,
            bots: HashSet<String>,
            bytes: u64,
        }

        let mut by_date: BTreeMap<NaiveDate, Agg> = BTreeMap::new();
        for record in self.bot_records() {
            let agg = by_date.entry(record.date).or_insert_with(|| Agg {
                total: 0,
                successful: 0,
                errors_4xx: 0,
                errors_5xx: 0,
                bots: HashSet::new(),
                bytes: 0,
            });
            agg.total += 1;
            match record.status {
                200 => agg.successful += 1,
                400..=499 => agg.errors_4xx += 1,
                500..=599 => agg.errors_5xx += 1,
                _ => {}
            }
            if let Some(bot) = record.bot_type.as_ref() {
                agg.bots.insert(bot.clone());
            }
            agg.bytes += record.bytes;
        }

        by_date
            .into_iter()
            .map(|(date, agg)| DailyCrawlRow {
                date,
                total_crawls: agg.total,
                successful: agg.successful,
                errors_4xx: agg.errors_4xx,
                errors_5xx: agg.errors_5xx,
                unique_bots: agg.bots.len(),
                total_bytes: agg.bytes,
            })
            .collect()
    }
}
