//! Browsing-history collection
//!
//! A [`HistorySource`] hands the collector flat rows of
//! `(timestamp, url[, title])`; both the 2- and 3-column shapes are
//! accepted, and a missing title is absent data, never an error. The
//! collector derives domain, hour and weekday per record, sorts descending
//! by timestamp and truncates to the configured limit.
//!
//! Failure policy: an unreachable or empty source produces an empty record
//! collection, which downstream stages treat as "no data available".

use crate::error::ProfileError;
use crate::types::BrowsingRecord;
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// One raw row from a browsing-history store
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub timestamp: NaiveDateTime,
    pub url: String,
    pub title: Option<String>,
}

/// Accepted wire shapes: `[ts, url]`, `[ts, url, title]`, or an object with
/// the same fields.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRow {
    Triple(NaiveDateTime, String, Option<String>),
    Pair(NaiveDateTime, String),
    Object {
        timestamp: NaiveDateTime,
        url: String,
        #[serde(default)]
        title: Option<String>,
    },
}

impl From<RawRow> for HistoryRow {
    fn from(raw: RawRow) -> Self {
        match raw {
            RawRow::Triple(timestamp, url, title) => Self {
                timestamp,
                url,
                title,
            },
            RawRow::Pair(timestamp, url) => Self {
                timestamp,
                url,
                title: None,
            },
            RawRow::Object {
                timestamp,
                url,
                title,
            } => Self {
                timestamp,
                url,
                title,
            },
        }
    }
}

impl<'de> Deserialize<'de> for HistoryRow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        RawRow::deserialize(deserializer).map(Self::from)
    }
}

impl HistoryRow {
    /// Parse newline-delimited JSON rows. Unparsable lines are dropped
    /// (record-level failures are never fatal).
    pub fn parse_ndjson(input: &str) -> Vec<HistoryRow> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| match serde_json::from_str::<HistoryRow>(line) {
                Ok(row) => Some(row),
                Err(e) => {
                    debug!("Dropping unparsable history row: {e}");
                    None
                }
            })
            .collect()
    }

    /// Parse a JSON array of rows
    pub fn parse_array(input: &str) -> Result<Vec<HistoryRow>, ProfileError> {
        serde_json::from_str::<Vec<HistoryRow>>(input)
            .map_err(|e| ProfileError::HistoryParseError(e.to_string()))
    }
}

/// A source of browsing-history rows
pub trait HistorySource {
    fn fetch(&self) -> Result<Vec<HistoryRow>, ProfileError>;
}

/// History source backed by an NDJSON file on disk
pub struct JsonHistorySource {
    path: PathBuf,
}

impl JsonHistorySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistorySource for JsonHistorySource {
    fn fetch(&self) -> Result<Vec<HistoryRow>, ProfileError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|source| ProfileError::ConfigRead {
                path: self.path.clone(),
                source,
            })?;
        Ok(HistoryRow::parse_ndjson(&content))
    }
}

/// Collector producing ordered, derived browsing records
pub struct BrowserCollector;

impl BrowserCollector {
    /// Collect up to `limit` records from a source, most recent first.
    ///
    /// A source failure is absorbed: the collector logs it and returns an
    /// empty collection rather than propagating the error.
    pub fn collect(source: &dyn HistorySource, limit: usize) -> Vec<BrowsingRecord> {
        let rows = match source.fetch() {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Browser history unavailable: {e}");
                return Vec::new();
            }
        };

        Self::from_rows(rows, limit)
    }

    /// Derive records from already-fetched rows, sorted descending by
    /// timestamp and truncated to `limit`.
    pub fn from_rows(rows: Vec<HistoryRow>, limit: usize) -> Vec<BrowsingRecord> {
        let mut records: Vec<BrowsingRecord> = rows
            .into_iter()
            .map(|row| BrowsingRecord {
                domain: url_authority(&row.url),
                hour: row.timestamp.hour(),
                weekday: row.timestamp.weekday(),
                timestamp: row.timestamp,
                url: row.url,
                title: row.title,
            })
            .collect();

        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records.truncate(limit);
        records
    }
}

/// Extract the URL authority: the text between `://` and the next `/`, `?`
/// or `#`. Userinfo and port are retained; a URL without a scheme yields an
/// empty string.
fn url_authority(url: &str) -> String {
    match url.find("://") {
        Some(idx) => {
            let rest = &url[idx + 3..];
            let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
            rest[..end].to_string()
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    struct StaticSource(Vec<HistoryRow>);

    impl HistorySource for StaticSource {
        fn fetch(&self) -> Result<Vec<HistoryRow>, ProfileError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl HistorySource for FailingSource {
        fn fetch(&self) -> Result<Vec<HistoryRow>, ProfileError> {
            Err(ProfileError::HistoryParseError("store locked".to_string()))
        }
    }

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn row(day: u32, hour: u32, url: &str) -> HistoryRow {
        HistoryRow {
            timestamp: ts(day, hour),
            url: url.to_string(),
            title: None,
        }
    }

    #[test]
    fn test_url_authority() {
        assert_eq!(url_authority("https://github.com/rust-lang"), "github.com");
        assert_eq!(url_authority("http://news.com"), "news.com");
        assert_eq!(url_authority("https://host:8080/path"), "host:8080");
        assert_eq!(url_authority("https://user@host/a"), "user@host");
        assert_eq!(url_authority("https://host?q=1"), "host");
        // No scheme means no authority
        assert_eq!(url_authority("github.com/rust-lang"), "");
    }

    #[test]
    fn test_collect_sorts_descending_and_truncates() {
        let source = StaticSource(vec![
            row(10, 8, "https://a.com"),
            row(12, 9, "https://b.com"),
            row(11, 7, "https://c.com"),
        ]);

        let records = BrowserCollector::collect(&source, 2);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].domain, "b.com");
        assert_eq!(records[1].domain, "c.com");
    }

    #[test]
    fn test_derived_fields() {
        let records = BrowserCollector::from_rows(
            vec![row(15, 22, "https://GitHub.com/Repo")],
            10,
        );

        assert_eq!(records[0].hour, 22);
        assert_eq!(records[0].weekday, chrono::Weekday::Mon);
        // Domain derivation preserves the original casing; matching
        // lowercases separately
        assert_eq!(records[0].domain, "GitHub.com");
    }

    #[test]
    fn test_source_failure_yields_empty() {
        let records = BrowserCollector::collect(&FailingSource, 100);
        assert!(records.is_empty());
    }

    #[test]
    fn test_two_and_three_column_rows() {
        let ndjson = concat!(
            "[\"2024-01-15T08:30:00\", \"https://a.com\"]\n",
            "[\"2024-01-15T09:00:00\", \"https://b.com\", \"B site\"]\n",
            "{\"timestamp\": \"2024-01-15T10:00:00\", \"url\": \"https://c.com\"}\n",
        );

        let rows = HistoryRow::parse_ndjson(ndjson);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].title, None);
        assert_eq!(rows[1].title, Some("B site".to_string()));
        assert_eq!(rows[2].title, None);
    }

    #[test]
    fn test_unparsable_rows_are_dropped() {
        let ndjson = "not json\n[\"2024-01-15T08:30:00\", \"https://a.com\"]\n";
        let rows = HistoryRow::parse_ndjson(ndjson);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_parse_array() {
        let rows = HistoryRow::parse_array(
            r#"[["2024-01-15T08:30:00", "https://a.com", null],
                ["2024-01-15T09:00:00", "https://b.com"]]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, None);
    }
}
