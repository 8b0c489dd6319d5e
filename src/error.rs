//! Error types for the interest profiler
//!
//! Only configuration failures are fatal: scoring is meaningless without a
//! category registry, so they abort the run before any collection starts.
//! Source-level and record-level failures are absorbed at the collector
//! boundary and never reach this type.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a profiling run
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Failed to read category config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid category config: {0}")]
    InvalidConfig(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse history input: {0}")]
    HistoryParseError(String),

    #[error("Failed to write profile report to {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}
