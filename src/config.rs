//! Profiler configuration
//!
//! Every threshold, time window and limit used by the pipeline lives here as
//! a named field so components never reach for implicit globals and tests can
//! override each knob independently.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default number of history entries kept per run
pub const DEFAULT_HISTORY_LIMIT: usize = 500;

/// Default number of files processed per scan
pub const DEFAULT_FILE_LIMIT: usize = 10_000;

/// Default worker pool size for per-file stat/classify work.
/// Bounds the number of concurrently open file handles.
pub const DEFAULT_SCAN_WORKERS: usize = 4;

/// An inclusive hour-of-day window.
///
/// Membership is `start <= hour && hour <= end` with no wrap handling; a
/// window whose start exceeds its end (night-owl 22-4) matches nothing.
/// That arithmetic is a compatibility requirement, not an oversight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    pub start: u32,
    pub end: u32,
}

impl HourWindow {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Whether an hour falls inside the window
    pub fn contains(&self, hour: u32) -> bool {
        self.start <= hour && hour <= self.end
    }
}

/// Configuration for a profiling run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilerConfig {
    /// Maximum browsing records kept (most recent first)
    pub history_limit: usize,

    /// Maximum files processed per scan
    pub file_limit: usize,

    /// Worker pool size for the filesystem scan
    pub scan_workers: usize,

    /// Directory names pruned before descent (matched by name, not path)
    pub excluded_dirs: BTreeSet<String>,

    /// Score floor above which a category counts as a primary interest
    /// ("Active {category} user", combined primary-category lists)
    pub active_user_floor: f64,

    /// Score floor for category-specific trait labels
    pub trait_floor: f64,

    /// Score floor for the academic curiosity trait
    pub academic_floor: f64,

    /// Average file size (bytes) above which storage habits flag large files
    pub large_file_floor_bytes: u64,

    /// Fraction of records that must fall inside an hour window for its
    /// behavioral label to fire
    pub window_share: f64,

    /// Early-bird activity window
    pub early_bird: HourWindow,

    /// Night-owl activity window (start > end, see [`HourWindow::contains`])
    pub night_owl: HourWindow,

    /// Working-hours activity window
    pub work_hours: HourWindow,

    /// Peak modification-hour range labelled "Morning person"
    pub morning_peak: HourWindow,

    /// Late-evening half of the "Night owl" peak range
    pub night_peak_late: HourWindow,

    /// Early-morning half of the "Night owl" peak range
    pub night_peak_early: HourWindow,

    /// Weight applied to browser scores when merging
    pub browser_weight: f64,

    /// Weight applied to file scores when merging
    pub file_weight: f64,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            file_limit: DEFAULT_FILE_LIMIT,
            scan_workers: DEFAULT_SCAN_WORKERS,
            excluded_dirs: [
                "node_modules",
                "venv",
                ".git",
                "AppData",
                "Cache",
                "cache",
                "tmp",
                "temp",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            active_user_floor: 0.2,
            trait_floor: 0.3,
            academic_floor: 0.2,
            large_file_floor_bytes: 100 * 1024 * 1024,
            window_share: 0.3,
            early_bird: HourWindow::new(5, 9),
            night_owl: HourWindow::new(22, 4),
            work_hours: HourWindow::new(9, 17),
            morning_peak: HourWindow::new(5, 11),
            night_peak_late: HourWindow::new(20, 23),
            night_peak_early: HourWindow::new(0, 4),
            browser_weight: 0.6,
            file_weight: 0.4,
        }
    }
}
