//! Record collectors
//!
//! Each evidence source has its own collector: browsing history rows and a
//! concurrent filesystem scan. Collectors fail softly: an unreachable
//! source yields an empty collection, and record-level failures drop only
//! the affected record.

pub mod browser;
pub mod files;

pub use browser::{BrowserCollector, HistoryRow, HistorySource, JsonHistorySource};
pub use files::{FileScanner, ScanOutcome};
