//! Interest scoring
//!
//! Maps each record to zero or more categories via the registry and
//! accumulates per-category counts. A record that matches several
//! categories increments each of them by exactly 1; within one category,
//! multiple matching keys still count once.
//!
//! Normalization divides every counter by the sum of counters, yielding a
//! distribution that sums to 1.0, or stays all-zero when nothing matched,
//! which signals "insufficient signal" rather than an error.

use crate::categories::CategorySet;
use crate::types::{BrowsingRecord, FileRecord, ScoreDistribution};
use std::collections::BTreeMap;

pub struct InterestScorer;

impl InterestScorer {
    /// Score browsing records: a category matches when any of its keywords
    /// appears as a substring of the lowercased URL.
    pub fn score_browser(records: &[BrowsingRecord], categories: &CategorySet) -> ScoreDistribution {
        Self::score(records.iter().map(|r| r.url.to_lowercase()), categories)
    }

    /// Score file records: a category matches when the record's extension
    /// is an element of its extension set.
    pub fn score_files(records: &[FileRecord], categories: &CategorySet) -> ScoreDistribution {
        Self::score(records.iter().map(|r| r.extension.clone()), categories)
    }

    fn score<I>(candidates: I, categories: &CategorySet) -> ScoreDistribution
    where
        I: IntoIterator<Item = String>,
    {
        // Every category starts at zero, matched or not
        let mut counts: BTreeMap<String, u64> = categories
            .names()
            .map(|name| (name.to_string(), 0))
            .collect();

        for candidate in candidates {
            for category in categories.categories() {
                if category.matches(&candidate) {
                    *counts.entry(category.name.clone()).or_insert(0) += 1;
                }
            }
        }

        let total: u64 = counts.values().sum();
        counts
            .into_iter()
            .map(|(name, count)| {
                let score = if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                };
                (name, score)
            })
            .collect()
    }
}

/// Sum of a distribution's values, for invariant checks
pub fn distribution_sum(scores: &ScoreDistribution) -> f64 {
    scores.values().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::CategoryRegistry;
    use chrono::{Datelike, NaiveDate};
    use pretty_assertions::assert_eq;

    fn browsing(url: &str) -> BrowsingRecord {
        let timestamp = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        BrowsingRecord {
            timestamp,
            url: url.to_string(),
            domain: String::new(),
            hour: 10,
            weekday: timestamp.weekday(),
            title: None,
        }
    }

    fn file(ext: &str) -> FileRecord {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        FileRecord {
            path: format!("/tmp/file{ext}"),
            name: format!("file{ext}"),
            extension: ext.to_string(),
            size: 1,
            created: ts,
            modified: ts,
            accessed: ts,
            content_type: "application/octet-stream".to_string(),
        }
    }

    fn test_registry() -> CategoryRegistry {
        CategoryRegistry::from_json_str(
            r#"{
                "browser": {
                    "categories": {
                        "development": ["github"],
                        "entertainment": ["news"],
                        "shopping": ["amazon"]
                    }
                },
                "files": {
                    "categories": {
                        "development": [".py", ".js"],
                        "documents": [".pdf"],
                        "media": [".jpg"],
                        "data_science": [".ipynb"]
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_browser_scenario_sixty_forty() {
        let registry = test_registry();
        let mut records: Vec<BrowsingRecord> = (0..6)
            .map(|i| browsing(&format!("https://github.com/repo{i}")))
            .collect();
        records.extend((0..4).map(|i| browsing(&format!("https://news.com/story{i}"))));

        let scores = InterestScorer::score_browser(&records, &registry.browser);
        assert_eq!(scores.get("development"), Some(&0.6));
        assert_eq!(scores.get("entertainment"), Some(&0.4));
        assert_eq!(scores.get("shopping"), Some(&0.0));
    }

    #[test]
    fn test_file_scenario_five_files() {
        let registry = test_registry();
        let records = vec![
            file(".py"),
            file(".py"),
            file(".jpg"),
            file(".pdf"),
            file(".ipynb"),
        ];

        let scores = InterestScorer::score_files(&records, &registry.files);
        assert_eq!(scores.get("development"), Some(&(2.0 / 5.0)));
        assert_eq!(scores.get("media"), Some(&(1.0 / 5.0)));
        assert_eq!(scores.get("documents"), Some(&(1.0 / 5.0)));
        assert_eq!(scores.get("data_science"), Some(&(1.0 / 5.0)));
    }

    #[test]
    fn test_record_matching_two_categories_increments_both() {
        let registry = CategoryRegistry::from_json_str(
            r#"{
                "browser": {
                    "categories": {
                        "development": ["github"],
                        "technology": ["git"]
                    }
                },
                "files": {"categories": {"x": [".x"]}}
            }"#,
        )
        .unwrap();

        // "github" contains both keys, so both categories count it once
        let records = vec![browsing("https://github.com")];
        let scores = InterestScorer::score_browser(&records, &registry.browser);
        assert_eq!(scores.get("development"), Some(&0.5));
        assert_eq!(scores.get("technology"), Some(&0.5));
    }

    #[test]
    fn test_multiple_keys_in_one_category_count_once() {
        let registry = CategoryRegistry::from_json_str(
            r#"{
                "browser": {"categories": {"development": ["git", "hub"]}},
                "files": {"categories": {"x": [".x"]}}
            }"#,
        )
        .unwrap();

        let records = vec![browsing("https://github.com")];
        let scores = InterestScorer::score_browser(&records, &registry.browser);
        assert_eq!(scores.get("development"), Some(&1.0));
    }

    #[test]
    fn test_no_matches_yields_all_zero() {
        let registry = test_registry();
        let records = vec![browsing("https://example.com")];
        let scores = InterestScorer::score_browser(&records, &registry.browser);
        assert_eq!(distribution_sum(&scores), 0.0);
        assert_eq!(scores.len(), 3);
    }

    #[test]
    fn test_distribution_sums_to_one_when_matched() {
        let registry = test_registry();
        let records = vec![
            browsing("https://github.com"),
            browsing("https://news.com"),
            browsing("https://amazon.com"),
        ];
        let scores = InterestScorer::score_browser(&records, &registry.browser);
        assert!((distribution_sum(&scores) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_records_yield_all_zero() {
        let registry = test_registry();
        let scores = InterestScorer::score_files(&[], &registry.files);
        assert_eq!(scores.len(), 4);
        assert_eq!(distribution_sum(&scores), 0.0);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let registry = test_registry();
        let records = vec![browsing("https://github.com"), browsing("https://news.com")];
        let first = InterestScorer::score_browser(&records, &registry.browser);
        let second = InterestScorer::score_browser(&records, &registry.browser);
        assert_eq!(first, second);
    }
}
