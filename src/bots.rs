//! Search-engine bot classification.
//!
//! Detection works over an ordered table of (bot name, pattern) pairs. The
//! table is scanned linearly and the first pattern that matches wins, so
//! declaration order is load-bearing: `googlebot` is declared before
//! `googlebot_mobile` and therefore claims every Googlebot user agent,
//! exactly as the table documents. Patterns are case-insensitive substring
//! searches within the raw User-Agent header, not whole-token matches.

use regex::{Regex, RegexBuilder};

/// Builtin bot table, in match-priority order.
///
/// Entries whose patterns are shadowed by an earlier overlapping entry
/// (e.g. `ahrefsbot` behind `ahrefs`) are kept so the table stays a faithful
/// inventory of recognized crawler names.
const BUILTIN_BOT_PATTERNS: &[(&str, &str)] = &[
    ("googlebot", "Googlebot"),
    ("googlebot_mobile", "Googlebot-Mobile"),
    ("bingbot", "bingbot"),
    ("yandex", "YandexBot"),
    ("baidu", "Baiduspider"),
    ("duckduckgo", "DuckDuckBot"),
    ("semrush", "SemrushBot"),
    ("ahrefs", "AhrefsBot"),
    ("screaming_frog", "Screaming Frog"),
    ("mj12bot", "MJ12bot"),
    ("dotbot", "DotBot"),
    ("ahrefsbot", "AhrefsBot"),
    ("semrushbot", "SemrushBot"),
];

/// Compiles a regex pattern, panicking with a detailed message if compilation
/// fails. Used for static patterns that are compile-time constants.
pub(crate) fn compile_regex(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

/// An immutable, ordered mapping from bot name to detection pattern.
///
/// Construct with [`BotPatternTable::builtin`] for the standard crawler set,
/// or [`BotPatternTable::from_pairs`] for a custom table.
#[derive(Debug)]
pub struct BotPatternTable {
    entries: Vec<(String, Regex)>,
}

impl BotPatternTable {
    /// Returns the builtin table of known search-engine and SEO crawlers.
    pub fn builtin() -> Self {
        let entries = BUILTIN_BOT_PATTERNS
            .iter()
            .map(|(name, pattern)| {
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .unwrap_or_else(|e| {
                        panic!(
                            "Failed to compile builtin bot pattern '{}' ({}): {}. This is a programming error.",
                            pattern, name, e
                        )
                    });
                (name.to_string(), regex)
            })
            .collect();
        BotPatternTable { entries }
    }

    /// Builds a table from (name, pattern) pairs, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`regex::Error`] if any pattern fails to
    /// compile.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut entries = Vec::new();
        for (name, pattern) in pairs {
            let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
            entries.push((name.to_string(), regex));
        }
        Ok(BotPatternTable { entries })
    }

    /// Classifies a user agent, returning the first matching bot name.
    pub fn classify(&self, user_agent: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, pattern)| pattern.is_match(user_agent))
            .map(|(name, _)| name.as_str())
    }

    /// Iterates over the bot names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BotPatternTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_bots() {
        let table = BotPatternTable::builtin();
        assert_eq!(
            table.classify("Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)"),
            Some("googlebot")
        );
        assert_eq!(
            table.classify("Mozilla/5.0 (compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)"),
            Some("bingbot")
        );
        assert_eq!(
            table.classify("Mozilla/5.0 (compatible; YandexBot/3.0; +http://yandex.com/bots)"),
            Some("yandex")
        );
        assert_eq!(table.classify("Screaming Frog SEO Spider/19.0"), Some("screaming_frog"));
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        let table = BotPatternTable::builtin();
        assert_eq!(table.classify("mozilla/5.0 (compatible; GOOGLEBOT/2.1)"), Some("googlebot"));
        assert_eq!(table.classify("BINGBOT/2.0"), Some("bingbot"));
    }

    #[test]
    fn test_classify_non_bot() {
        let table = BotPatternTable::builtin();
        assert_eq!(
            table.classify("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"),
            None
        );
        assert_eq!(table.classify(""), None);
    }

    #[test]
    fn test_first_match_wins_for_overlapping_patterns() {
        // "Googlebot" is declared before "Googlebot-Mobile", so the generic
        // name claims the mobile user agent too.
        let table = BotPatternTable::builtin();
        assert_eq!(
            table.classify("Mozilla/5.0 (Linux; Android 6.0.1; Nexus 5X) Googlebot-Mobile/2.1"),
            Some("googlebot")
        );
    }

    #[test]
    fn test_custom_table_order_is_preserved() {
        let table = BotPatternTable::from_pairs([
            ("specific", "FooBot-Special"),
            ("generic", "FooBot"),
        ])
        .unwrap();
        // Both patterns match; the earlier declaration wins.
        assert_eq!(table.classify("FooBot-Special/1.0"), Some("specific"));
        assert_eq!(table.classify("FooBot/1.0"), Some("generic"));

        let reversed = BotPatternTable::from_pairs([
            ("generic", "FooBot"),
            ("specific", "FooBot-Special"),
        ])
        .unwrap();
        assert_eq!(reversed.classify("FooBot-Special/1.0"), Some("generic"));
    }

    #[test]
    fn test_substring_match_inside_unrelated_token() {
        // Matching is a substring search, not a whole-token match.
        let table = BotPatternTable::builtin();
        assert_eq!(table.classify("SomeAggregator (powered-by-GooglebotProxy)"), Some("googlebot"));
    }

    #[test]
    fn test_from_pairs_invalid_pattern() {
        let result = BotPatternTable::from_pairs([("broken", "(unclosed")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_builtin_table_shape() {
        let table = BotPatternTable::builtin();
        assert!(!table.is_empty());
        assert_eq!(table.len(), 13);
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names[0], "googlebot");
        assert_eq!(names[1], "googlebot_mobile");
    }
}
