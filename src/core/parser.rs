//! Parser for the free-text compliance report
//!
//! The report is a sequence of blocks, one per account:
//!
//! ```text
//! Springfield (120 application applied):
//! - Invalid Req: 14 (11.7%)
//! - Unknown Error: 3 (2.5%)
//! ```
//!
//! Each block is split into `- ` fragments. Fragments below the percentage
//! threshold, or that don't match the expected shape, are dropped.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::core::issue::normalize_label;
use crate::core::trace::Tracer;

/// Account header: `<name> (<N> application applied):`
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^\r\n():]+?)\s*\((\d+)\s+applications?\s+applied\):").expect("header regex")
});

/// Trailing `(<pct>%)` on an issue line
static PERCENTAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+(?:\.\d+)?)\s*%\)").expect("percentage regex"));

/// `<issue>: <count>` at the start of a fragment
static ISSUE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([^:\r\n]+?)\s*:\s*(\d+)").expect("issue line regex"));

const FRAGMENT_DELIMITER: &str = "- ";

/// One qualifying issue line from the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedItem {
    pub account: String,
    pub issue: String,
    pub count: usize,
    pub percentage: f64,
}

/// Extracts qualifying issue lines from report text
#[derive(Debug, Clone, Copy)]
pub struct ReportParser {
    min_percentage: f64,
    tracer: Tracer,
}

impl ReportParser {
    pub fn new(min_percentage: f64) -> Self {
        Self {
            min_percentage,
            tracer: Tracer::silent(),
        }
    }

    pub fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = tracer;
        self
    }

    /// Parse every account block in `text`, in text order
    pub fn parse(&self, text: &str) -> Vec<ParsedItem> {
        let starts: Vec<usize> = HEADER.find_iter(text).map(|m| m.start()).collect();
        if starts.is_empty() {
            self.tracer.trace("No account headers found in report text");
            return Vec::new();
        }

        let mut items = Vec::new();
        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            self.parse_block(&text[start..end], &mut items);
        }
        items
    }

    fn parse_block(&self, block: &str, items: &mut Vec<ParsedItem>) {
        let Some(header) = HEADER.captures(block) else {
            self.tracer.trace(format_args!("Skipping block without header: {:?}", block));
            return;
        };
        let account = header[1].trim().to_string();
        let body_start = header.get(0).map_or(0, |m| m.end());

        items.extend(
            block[body_start..]
                .split(FRAGMENT_DELIMITER)
                .skip(1)
                .filter_map(|fragment| self.parse_fragment(&account, fragment)),
        );
    }

    fn parse_fragment(&self, account: &str, fragment: &str) -> Option<ParsedItem> {
        let Some(percentage) = PERCENTAGE
            .captures(fragment)
            .and_then(|c| c[1].parse::<f64>().ok())
        else {
            self.tracer.trace(format_args!(
                "{}: no percentage in {:?}",
                account,
                fragment.trim()
            ));
            return None;
        };

        if percentage < self.min_percentage {
            return None;
        }

        let Some(line) = ISSUE_LINE.captures(fragment) else {
            self.tracer.trace(format_args!(
                "{}: malformed issue line {:?}",
                account,
                fragment.trim()
            ));
            return None;
        };
        let count = line[2].parse::<usize>().ok()?;

        Some(ParsedItem {
            account: account.to_string(),
            issue: normalize_label(&line[1]),
            count,
            percentage,
        })
    }
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new(crate::core::config::DEFAULT_MIN_PERCENTAGE)
    }
}

/// Parse report text with the default threshold
pub fn parse_report(text: &str) -> Vec<ParsedItem> {
    ReportParser::default().parse(text)
}
