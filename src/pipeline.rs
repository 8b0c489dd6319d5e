//! Pipeline orchestration
//!
//! [`ProfileEngine`] is the public entry point: it holds the validated
//! category registry and the run configuration, turns each source's record
//! collection into a profile, and merges the two into the final report.
//!
//! The two source pipelines share no state and may run in either order with
//! identical results; everything past collection is pure, single-threaded
//! computation.

use crate::categories::CategoryRegistry;
use crate::collect::files::ScanOutcome;
use crate::combine::ProfileCombiner;
use crate::config::ProfilerConfig;
use crate::error::ProfileError;
use crate::insights::InsightGenerator;
use crate::patterns::{BrowserPatternAnalyzer, FilePatternAnalyzer};
use crate::scoring::InterestScorer;
use crate::types::{
    BrowserProfile, BrowserSummary, BrowsingRecord, DateRange, FileProfile, FileSummary,
    Producer, ProfileReport, SourceStatus,
};
use crate::{PRODUCER_NAME, PROFILER_VERSION};
use chrono::Utc;
use std::path::Path;
use uuid::Uuid;

/// Profiling engine holding the registry and configuration for a run
pub struct ProfileEngine {
    registry: CategoryRegistry,
    config: ProfilerConfig,
    instance_id: String,
}

impl Default for ProfileEngine {
    fn default() -> Self {
        Self::new(CategoryRegistry::default(), ProfilerConfig::default())
    }
}

impl ProfileEngine {
    pub fn new(registry: CategoryRegistry, config: ProfilerConfig) -> Self {
        Self {
            registry,
            config,
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    /// Build the browsing-source profile.
    ///
    /// An empty collection is "no data available", not an error: the
    /// profile carries an all-zero distribution and empty patterns, so it
    /// naturally contributes nothing downstream.
    pub fn browser_profile(&self, records: &[BrowsingRecord]) -> BrowserProfile {
        let interests = InterestScorer::score_browser(records, &self.registry.browser);
        let patterns = BrowserPatternAnalyzer::analyze(records);
        let insights = InsightGenerator::new(&self.config).browser(
            &interests,
            &patterns.hourly_activity,
            records.len(),
        );

        let date_range = records
            .iter()
            .map(|r| r.timestamp)
            .min()
            .zip(records.iter().map(|r| r.timestamp).max())
            .map(|(start, end)| DateRange { start, end });

        BrowserProfile {
            status: status_for(records.is_empty()),
            interests,
            patterns,
            insights,
            summary: BrowserSummary {
                total_urls: records.len(),
                date_range,
            },
        }
    }

    /// Build the filesystem-source profile from a scan outcome
    pub fn file_profile(&self, outcome: &ScanOutcome) -> FileProfile {
        let records = &outcome.records;

        let interests = InterestScorer::score_files(records, &self.registry.files);
        let patterns = FilePatternAnalyzer::analyze(records, &self.registry.files);
        let insights = InsightGenerator::new(&self.config).files(&interests, &patterns);

        let date_range = records
            .iter()
            .map(|r| r.created)
            .min()
            .zip(records.iter().map(|r| r.created).max())
            .map(|(start, end)| DateRange { start, end });

        FileProfile {
            status: status_for(records.is_empty()),
            interests,
            summary: FileSummary {
                total_files: records.len(),
                skipped_files: outcome.skipped,
                total_size_bytes: patterns.size_metrics.total_size,
                date_range,
            },
            patterns,
            insights,
        }
    }

    /// Run both source pipelines and merge them into the final report
    pub fn generate(&self, records: &[BrowsingRecord], outcome: &ScanOutcome) -> ProfileReport {
        let browser = self.browser_profile(records);
        let files = self.file_profile(outcome);
        let combined = ProfileCombiner::new(&self.config).combine(&browser, &files);

        ProfileReport {
            producer: Producer {
                name: PRODUCER_NAME.to_string(),
                version: PROFILER_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            generated_at: Utc::now(),
            browser,
            files,
            combined,
        }
    }
}

fn status_for(empty: bool) -> SourceStatus {
    if empty {
        SourceStatus::NoData
    } else {
        SourceStatus::Ok
    }
}

impl ProfileReport {
    /// Serialize the snapshot as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ProfileError> {
        serde_json::to_string_pretty(self).map_err(ProfileError::from)
    }

    /// Write the snapshot to durable storage
    pub fn write_to(&self, path: &Path) -> Result<(), ProfileError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ProfileError::ReportWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::browser::{BrowserCollector, HistoryRow};
    use crate::scoring::distribution_sum;
    use crate::types::FileRecord;
    use chrono::{NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn rows(urls: &[&str]) -> Vec<HistoryRow> {
        urls.iter()
            .enumerate()
            .map(|(i, url)| HistoryRow {
                timestamp: ts(1 + (i as u32 % 28), 10),
                url: url.to_string(),
                title: None,
            })
            .collect()
    }

    fn file(name: &str, ext: &str, size: u64) -> FileRecord {
        FileRecord {
            path: format!("/home/user/{name}"),
            name: name.to_string(),
            extension: ext.to_string(),
            size,
            created: ts(5, 9),
            modified: ts(12, 14),
            accessed: ts(12, 14),
            content_type: "application/octet-stream".to_string(),
        }
    }

    fn scan(records: Vec<FileRecord>) -> ScanOutcome {
        ScanOutcome {
            records,
            skipped: 0,
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let engine = ProfileEngine::default();

        let mut urls: Vec<&str> = vec!["https://github.com/rust-lang/rust"; 6];
        urls.extend(vec!["https://news.com/today"; 4]);
        let records = BrowserCollector::from_rows(rows(&urls), 500);

        let outcome = scan(vec![
            file("a.py", ".py", 100),
            file("b.py", ".py", 200),
            file("c.jpg", ".jpg", 50),
            file("d.pdf", ".pdf", 400),
            file("e.ipynb", ".ipynb", 300),
        ]);

        let report = engine.generate(&records, &outcome);

        assert_eq!(report.browser.status, SourceStatus::Ok);
        assert_eq!(report.browser.interests["development"], 0.6);
        assert_eq!(report.browser.interests["entertainment"], 0.4);

        assert_eq!(report.files.interests["development"], 0.4);
        assert_eq!(report.files.summary.total_files, 5);
        assert_eq!(report.files.summary.total_size_bytes, 1050);

        // 0.6 * 0.6 + 0.4 * 0.4
        let merged_dev = report.combined.interests["development"];
        assert!((merged_dev - 0.52).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_invariants() {
        let engine = ProfileEngine::default();
        let records = BrowserCollector::from_rows(rows(&["https://github.com/x"]), 500);
        let profile = engine.browser_profile(&records);

        let sum = distribution_sum(&profile.interests);
        assert!(sum == 0.0 || (sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_sources_produce_no_data_profiles() {
        let engine = ProfileEngine::default();
        let report = engine.generate(&[], &scan(Vec::new()));

        assert_eq!(report.browser.status, SourceStatus::NoData);
        assert_eq!(report.files.status, SourceStatus::NoData);
        assert_eq!(distribution_sum(&report.combined.interests), 0.0);
        assert!(report.combined.primary_categories.browser.is_empty());
        assert!(report.combined.primary_categories.files.is_empty());
        assert_eq!(report.browser.summary.date_range, None);
    }

    #[test]
    fn test_generate_is_idempotent() {
        let engine = ProfileEngine::default();
        let records = BrowserCollector::from_rows(
            rows(&["https://github.com/a", "https://news.com/b"]),
            500,
        );
        let outcome = scan(vec![file("a.py", ".py", 10)]);

        let first = engine.generate(&records, &outcome);
        let second = engine.generate(&records, &outcome);

        assert_eq!(first.browser, second.browser);
        assert_eq!(first.files, second.files);
        assert_eq!(first.combined, second.combined);
    }

    #[test]
    fn test_report_serializes() {
        let engine = ProfileEngine::default();
        let report = engine.generate(&[], &scan(Vec::new()));

        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["producer"]["name"], PRODUCER_NAME);
        assert_eq!(value["browser"]["status"], "no_data");
        assert!(value["combined"]["interests"].is_object());
    }

    #[test]
    fn test_report_roundtrip_via_file() {
        let engine = ProfileEngine::default();
        let records =
            BrowserCollector::from_rows(rows(&["https://github.com/rust-lang"]), 500);
        let report = engine.generate(&records, &scan(vec![file("a.py", ".py", 10)]));

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("profile.json");
        report.write_to(&path).unwrap();

        let loaded: ProfileReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.combined, report.combined);
    }
}
