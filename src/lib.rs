//! Heuristic user interest profiling from local activity evidence.
//!
//! The crate turns two independent evidence sources into one merged
//! interest snapshot:
//!
//! - browsing history rows (timestamp, URL, optional title)
//! - filesystem metadata gathered by walking configured roots
//!
//! Each source flows through the same staged shape: collection produces
//! normalized records, pattern analysis and interest scoring run over
//! those records, an insight pass derives behavioral labels, and the two
//! per-source profiles are merged with a fixed weighting into a combined
//! distribution. The final [`ProfileReport`] serializes to a single JSON
//! document.
//!
//! All scoring is heuristic keyword and extension matching against a
//! [`CategoryRegistry`]; no content is read from files and no page bodies
//! are fetched. Interest distributions are normalized so non-zero scores
//! sum to 1.0 per source.
//!
//! ```no_run
//! use interest_profiler::{
//!     BrowserCollector, FileScanner, JsonHistorySource, ProfileEngine,
//! };
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), interest_profiler::ProfileError> {
//! let engine = ProfileEngine::default();
//!
//! let source = JsonHistorySource::new("history.ndjson");
//! let records = BrowserCollector::collect(&source, engine.config().history_limit);
//!
//! let scanner = FileScanner::from_config(engine.config());
//! let outcome = scanner.scan(&[PathBuf::from("/home/user/Documents")]);
//!
//! let report = engine.generate(&records, &outcome);
//! println!("{}", report.to_json()?);
//! # Ok(())
//! # }
//! ```

pub mod categories;
pub mod collect;
pub mod combine;
pub mod config;
pub mod error;
pub mod insights;
pub mod patterns;
pub mod pipeline;
pub mod scoring;
pub mod types;

pub use categories::{Category, CategoryRegistry, CategorySet, MatchKind};
pub use collect::{BrowserCollector, FileScanner, HistoryRow, HistorySource, JsonHistorySource, ScanOutcome};
pub use combine::ProfileCombiner;
pub use config::{HourWindow, ProfilerConfig};
pub use error::ProfileError;
pub use insights::InsightGenerator;
pub use patterns::{BrowserPatternAnalyzer, FilePatternAnalyzer};
pub use pipeline::ProfileEngine;
pub use scoring::InterestScorer;
pub use types::{
    BrowserProfile, BrowsingRecord, CombinedProfile, FileProfile, FileRecord, ProfileReport,
    SourceStatus,
};

/// Crate version, stamped into every report's producer block
pub const PROFILER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name stamped into every report
pub const PRODUCER_NAME: &str = "interest-profiler";
