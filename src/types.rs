//! Core types for the profiling pipeline
//!
//! This module defines the data that flows through each stage: raw records
//! from the two collectors, pattern reports, per-source profiles and the
//! combined report. Records are created during collection, read-only
//! afterwards and discarded after the run; only the profile types are part
//! of the serialized snapshot.

use chrono::{DateTime, NaiveDateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized per-category weights. Either all values are zero (no signal)
/// or they sum to 1.0 within floating tolerance.
pub type ScoreDistribution = BTreeMap<String, f64>;

/// Sparse hour-of-day histogram; keys present only if observed
pub type HourHistogram = BTreeMap<u32, u64>;

/// Sparse weekday-name histogram ("Monday".."Sunday")
pub type DayHistogram = BTreeMap<String, u64>;

/// One visit from the browsing history, with fields derived at collection
/// time from the URL and the raw local timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowsingRecord {
    pub timestamp: NaiveDateTime,
    pub url: String,
    /// URL authority (empty when the URL carries no scheme)
    pub domain: String,
    /// Hour of day, 0-23, local wall-clock
    pub hour: u32,
    pub weekday: Weekday,
    pub title: Option<String>,
}

/// Metadata for one scanned file. `path` is unique within a single scan;
/// `extension` is derived deterministically from the path.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub path: String,
    pub name: String,
    /// Lowercased, with leading dot, or empty when the file has none
    pub extension: String,
    pub size: u64,
    pub created: NaiveDateTime,
    pub modified: NaiveDateTime,
    pub accessed: NaiveDateTime,
    pub content_type: String,
}

/// Whether a source produced any records this run.
///
/// `NoData` is the explicit "no data available" marker: an unreachable or
/// empty source is not an error, and downstream stages treat the profile as
/// a zero contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Ok,
    NoData,
}

/// First and last timestamp observed in a record collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Frequency and temporal statistics for the browsing source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowserPatterns {
    /// Top-20 normalized URL terms with counts
    pub common_terms: Vec<(String, u64)>,
    /// Top-10 domains with counts
    pub domain_frequency: Vec<(String, u64)>,
    pub hourly_activity: HourHistogram,
    /// Top-3 most active hours
    pub peak_hours: Vec<(u32, u64)>,
    pub day_distribution: DayHistogram,
}

/// Name/size/path triple for the largest-files report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LargeFile {
    pub name: String,
    pub size: u64,
    pub path: String,
}

/// Aggregate size statistics for a scan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeMetrics {
    pub total_size: u64,
    pub average_size: f64,
    /// Top-5 largest files by size
    pub largest_files: Vec<LargeFile>,
}

/// Frequency, temporal and size statistics for the filesystem source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilePatterns {
    pub extension_counts: BTreeMap<String, u64>,
    /// Raw per-category record counts (pre-normalization)
    pub category_distribution: BTreeMap<String, u64>,
    pub creation_hours: HourHistogram,
    pub modification_hours: HourHistogram,
    pub weekly_activity: DayHistogram,
    pub size_metrics: SizeMetrics,
}

/// Qualitative labels inferred from browsing behavior
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowserInsights {
    pub traits: Vec<String>,
    pub work_style: Vec<String>,
}

/// Qualitative labels inferred from file patterns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileInsights {
    pub primary_activities: Vec<String>,
    pub work_habits: Vec<String>,
    pub storage_habits: Vec<String>,
}

/// Collection summary for the browsing source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowserSummary {
    pub total_urls: usize,
    pub date_range: Option<DateRange>,
}

/// Collection summary for the filesystem source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub total_files: usize,
    /// Files dropped by record-level failures during the scan
    pub skipped_files: usize,
    pub total_size_bytes: u64,
    /// Oldest and newest creation times observed
    pub date_range: Option<DateRange>,
}

/// Complete profile for the browsing source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserProfile {
    pub status: SourceStatus,
    pub interests: ScoreDistribution,
    pub patterns: BrowserPatterns,
    pub insights: BrowserInsights,
    pub summary: BrowserSummary,
}

/// Complete profile for the filesystem source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileProfile {
    pub status: SourceStatus,
    pub interests: ScoreDistribution,
    pub patterns: FilePatterns,
    pub insights: FileInsights,
    pub summary: FileSummary,
}

/// Peak-activity data reported per source, side by side. Browser hours and
/// file-modification hours live in different temporal domains and are never
/// summed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityTimes {
    pub browser: Vec<(u32, u64)>,
    pub files: HourHistogram,
}

/// Categories scoring above the active-user floor, kept per source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimaryCategories {
    pub browser: Vec<String>,
    pub files: Vec<String>,
}

/// The 0.6/0.4-weighted merge of the two sources plus side-by-side
/// temporal and categorical summaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedProfile {
    pub interests: ScoreDistribution,
    pub activity_times: ActivityTimes,
    pub primary_categories: PrimaryCategories,
}

/// Report producer metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Final snapshot written at the end of a run. Consumers treat absent keys
/// as "no signal", not malformed output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    pub producer: Producer,
    pub generated_at: DateTime<Utc>,
    pub browser: BrowserProfile,
    pub files: FileProfile,
    pub combined: CombinedProfile,
}
