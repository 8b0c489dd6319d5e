//! Pattern analysis
//!
//! Pure frequency/temporal aggregation over collected records. Nothing here
//! mutates its input, and re-running over the same collection produces an
//! identical report.

use crate::categories::CategorySet;
use crate::types::{
    BrowserPatterns, BrowsingRecord, DayHistogram, FilePatterns, FileRecord, HourHistogram,
    LargeFile, SizeMetrics,
};
use chrono::{Datelike, Timelike, Weekday};
use std::collections::BTreeMap;

/// Terms reported from URL content
const TOP_TERMS: usize = 20;
/// Domains reported
const TOP_DOMAINS: usize = 10;
/// Peak hours reported
const TOP_HOURS: usize = 3;
/// Largest files reported
const TOP_LARGEST: usize = 5;

/// Minimum token length kept during URL term extraction
const MIN_TERM_LEN: usize = 3;

/// Common English stopwords dropped from URL terms
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "his", "has", "have", "this", "that", "with", "from", "they", "will",
    "what", "when", "where", "which", "your", "their", "there", "than", "then", "them", "these",
    "some", "into", "more", "other", "about", "after",
];

/// Protocol/TLD boilerplate dropped from URL terms
const URL_COMMON_TERMS: &[&str] = &["com", "www", "http", "https", "org", "net"];

/// Frequency and temporal statistics for browsing records
pub struct BrowserPatternAnalyzer;

impl BrowserPatternAnalyzer {
    pub fn analyze(records: &[BrowsingRecord]) -> BrowserPatterns {
        let mut term_counts: BTreeMap<String, u64> = BTreeMap::new();
        let mut domain_counts: BTreeMap<String, u64> = BTreeMap::new();
        let mut hourly: HourHistogram = BTreeMap::new();
        let mut days: DayHistogram = BTreeMap::new();

        for record in records {
            for term in extract_terms(&record.url) {
                *term_counts.entry(term).or_insert(0) += 1;
            }
            *domain_counts.entry(record.domain.clone()).or_insert(0) += 1;
            *hourly.entry(record.hour).or_insert(0) += 1;
            *days
                .entry(weekday_name(record.weekday).to_string())
                .or_insert(0) += 1;
        }

        let peak_hours = top_n(&hourly, TOP_HOURS);

        BrowserPatterns {
            common_terms: top_n(&term_counts, TOP_TERMS),
            domain_frequency: top_n(&domain_counts, TOP_DOMAINS),
            hourly_activity: hourly,
            peak_hours,
            day_distribution: days,
        }
    }
}

/// Extension, category, temporal and size statistics for file records
pub struct FilePatternAnalyzer;

impl FilePatternAnalyzer {
    pub fn analyze(records: &[FileRecord], categories: &CategorySet) -> FilePatterns {
        let mut extension_counts: BTreeMap<String, u64> = BTreeMap::new();
        let mut creation_hours: HourHistogram = BTreeMap::new();
        let mut modification_hours: HourHistogram = BTreeMap::new();
        let mut weekly: DayHistogram = BTreeMap::new();

        for record in records {
            *extension_counts
                .entry(record.extension.clone())
                .or_insert(0) += 1;
            *creation_hours.entry(record.created.hour()).or_insert(0) += 1;
            *modification_hours
                .entry(record.modified.hour())
                .or_insert(0) += 1;
            *weekly
                .entry(weekday_name(record.modified.weekday()).to_string())
                .or_insert(0) += 1;
        }

        // Raw per-category counts, pre-normalization
        let mut category_distribution: BTreeMap<String, u64> = BTreeMap::new();
        for category in categories.categories() {
            let count = records
                .iter()
                .filter(|r| category.matches(&r.extension))
                .count() as u64;
            category_distribution.insert(category.name.clone(), count);
        }

        FilePatterns {
            extension_counts,
            category_distribution,
            creation_hours,
            modification_hours,
            weekly_activity: weekly,
            size_metrics: size_metrics(records),
        }
    }
}

/// Total, mean and top-N largest file sizes
fn size_metrics(records: &[FileRecord]) -> SizeMetrics {
    let total_size: u64 = records.iter().map(|r| r.size).sum();
    let average_size = if records.is_empty() {
        0.0
    } else {
        total_size as f64 / records.len() as f64
    };

    let mut by_size: Vec<&FileRecord> = records.iter().collect();
    by_size.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));

    let largest_files = by_size
        .into_iter()
        .take(TOP_LARGEST)
        .map(|r| LargeFile {
            name: r.name.clone(),
            size: r.size,
            path: r.path.clone(),
        })
        .collect();

    SizeMetrics {
        total_size,
        average_size,
        largest_files,
    }
}

/// Tokenize a URL into normalized terms: lowercase, punctuation to spaces,
/// then drop stopwords, protocol/TLD boilerplate and short tokens.
fn extract_terms(url: &str) -> Vec<String> {
    let cleaned: String = url
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| {
            token.len() >= MIN_TERM_LEN
                && !STOPWORDS.contains(token)
                && !URL_COMMON_TERMS.contains(token)
        })
        .map(str::to_string)
        .collect()
}

/// Most frequent entries: count descending, key ascending on ties
fn top_n<K: Ord + Clone>(counts: &BTreeMap<K, u64>, n: usize) -> Vec<(K, u64)> {
    let mut entries: Vec<(K, u64)> = counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(n);
    entries
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
