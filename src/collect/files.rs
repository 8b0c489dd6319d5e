//! Filesystem scanning
//!
//! Walks each root recursively, pruning directories by name before descent,
//! and stats/classifies files in per-directory batches across a small fixed
//! worker pool. The traversal driver stays single-threaded: it issues one
//! batch at a time and joins it before appending results, so the record
//! collection is never shared mutably.
//!
//! Per-file failures are modelled as `Result<FileRecord, SkipReason>`; the
//! scan output is the filtered sequence of successes plus a skip count kept
//! as observability data.

use crate::config::ProfilerConfig;
use crate::types::FileRecord;
use chrono::{DateTime, Local, NaiveDateTime};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Why a single file was dropped from the scan
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("metadata unavailable: {0}")]
    Metadata(std::io::Error),

    #[error("timestamps unavailable: {0}")]
    Timestamps(std::io::Error),

    #[error("not a regular file")]
    NotAFile,
}

/// Result of one scan: collected records plus the number of files dropped
/// by record-level failures.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub records: Vec<FileRecord>,
    pub skipped: usize,
}

/// Concurrent filesystem collector
pub struct FileScanner {
    excluded_dirs: BTreeSet<String>,
    limit: usize,
    workers: usize,
}

impl FileScanner {
    pub fn new(excluded_dirs: BTreeSet<String>, limit: usize, workers: usize) -> Self {
        Self {
            excluded_dirs,
            limit,
            workers: workers.max(1),
        }
    }

    pub fn from_config(config: &ProfilerConfig) -> Self {
        Self::new(
            config.excluded_dirs.clone(),
            config.file_limit,
            config.scan_workers,
        )
    }

    /// Scan the given roots, stopping once the file limit is reached.
    ///
    /// Non-existent roots are skipped with a warning. The limit may be
    /// overshot by at most one in-flight batch; the result is truncated
    /// back to the limit either way.
    pub fn scan(&self, roots: &[PathBuf]) -> ScanOutcome {
        let mut records: Vec<FileRecord> = Vec::new();
        let mut skipped = 0usize;

        'roots: for root in roots {
            if !root.exists() {
                warn!("Skipping non-existent scan root: {}", root.display());
                continue;
            }

            let walker = WalkDir::new(root)
                .follow_links(false)
                .into_iter()
                .filter_entry(|e| !self.is_excluded_dir(e));

            // Files arrive grouped by parent directory; each group becomes
            // one batch for the worker pool.
            let mut batch: Vec<PathBuf> = Vec::new();
            let mut batch_parent: Option<PathBuf> = None;

            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        debug!("Error walking directory: {e}");
                        skipped += 1;
                        continue;
                    }
                };

                if !entry.file_type().is_file() {
                    continue;
                }

                let parent = entry.path().parent().map(Path::to_path_buf);
                if parent != batch_parent && !batch.is_empty() {
                    self.process_batch(&mut batch, &mut records, &mut skipped);
                    if records.len() >= self.limit {
                        break 'roots;
                    }
                }

                batch_parent = parent;
                batch.push(entry.into_path());
            }

            if !batch.is_empty() {
                self.process_batch(&mut batch, &mut records, &mut skipped);
                if records.len() >= self.limit {
                    break 'roots;
                }
            }
        }

        records.truncate(self.limit);
        info!(
            files = records.len(),
            skipped, "Filesystem scan complete"
        );

        ScanOutcome { records, skipped }
    }

    /// Prune by directory *name*, not full path, before descending
    fn is_excluded_dir(&self, entry: &walkdir::DirEntry) -> bool {
        entry.file_type().is_dir()
            && self
                .excluded_dirs
                .contains(entry.file_name().to_string_lossy().as_ref())
    }

    /// Dispatch one directory's files across the worker pool and join the
    /// whole batch before appending. The join is the only synchronisation
    /// point.
    fn process_batch(
        &self,
        batch: &mut Vec<PathBuf>,
        records: &mut Vec<FileRecord>,
        skipped: &mut usize,
    ) {
        let paths = std::mem::take(batch);
        let workers = self.workers.min(paths.len());
        let chunk_size = paths.len().div_ceil(workers);

        let results: Vec<Result<FileRecord, SkipReason>> = std::thread::scope(|scope| {
            let handles: Vec<_> = paths
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || chunk.iter().map(|p| stat_file(p)).collect::<Vec<_>>())
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap_or_default())
                .collect()
        });

        for result in results {
            match result {
                Ok(record) => records.push(record),
                Err(reason) => {
                    debug!("Skipping file: {reason}");
                    *skipped += 1;
                }
            }
        }
    }
}

/// Stat and classify a single file
fn stat_file(path: &Path) -> Result<FileRecord, SkipReason> {
    let metadata = std::fs::metadata(path).map_err(SkipReason::Metadata)?;
    if !metadata.is_file() {
        return Err(SkipReason::NotAFile);
    }

    let modified = metadata.modified().map_err(SkipReason::Timestamps)?;
    // Birth/access times are not available on every filesystem; fall back
    // to mtime rather than dropping the record.
    let created = metadata.created().unwrap_or(modified);
    let accessed = metadata.accessed().unwrap_or(modified);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default();

    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    Ok(FileRecord {
        path: path.to_string_lossy().to_string(),
        name,
        extension,
        size: metadata.len(),
        created: local_timestamp(created),
        modified: local_timestamp(modified),
        accessed: local_timestamp(accessed),
        content_type,
    })
}

/// Raw local wall-clock time, matching the browsing-record convention
fn local_timestamp(time: SystemTime) -> NaiveDateTime {
    DateTime::<Local>::from(time).naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scanner(limit: usize) -> FileScanner {
        let excluded = ["node_modules", "cache"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        FileScanner::new(excluded, limit, 4)
    }

    fn touch(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_scan_collects_metadata() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "report.PDF", "12345");
        touch(dir.path(), "notes", "");

        let outcome = scanner(100).scan(&[dir.path().to_path_buf()]);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.skipped, 0);

        let pdf = outcome
            .records
            .iter()
            .find(|r| r.name == "report.PDF")
            .unwrap();
        assert_eq!(pdf.extension, ".pdf");
        assert_eq!(pdf.size, 5);
        assert_eq!(pdf.content_type, "application/pdf");

        let bare = outcome.records.iter().find(|r| r.name == "notes").unwrap();
        assert_eq!(bare.extension, "");
    }

    #[test]
    fn test_excluded_dirs_are_never_descended() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        touch(&dir.path().join("src"), "main.py", "print()");
        touch(&dir.path().join("node_modules/pkg"), "index.js", "x");

        let outcome = scanner(100).scan(&[dir.path().to_path_buf()]);
        assert_eq!(outcome.records.len(), 1);

        for record in &outcome.records {
            let has_excluded_segment = Path::new(&record.path)
                .components()
                .any(|c| c.as_os_str() == "node_modules");
            assert!(!has_excluded_segment, "descended into {}", record.path);
        }
    }

    #[test]
    fn test_limit_is_an_upper_bound() {
        let dir = TempDir::new().unwrap();
        for i in 0..10 {
            touch(dir.path(), &format!("file{i}.txt"), "x");
        }

        let outcome = scanner(3).scan(&[dir.path().to_path_buf()]);
        assert_eq!(outcome.records.len(), 3);
    }

    #[test]
    fn test_missing_root_is_soft() {
        let outcome = scanner(10).scan(&[PathBuf::from("/nonexistent/profiler-root")]);
        assert!(outcome.records.is_empty());
    }

    #[test]
    fn test_paths_are_unique() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        touch(&dir.path().join("a"), "one.txt", "1");
        touch(&dir.path().join("b"), "two.txt", "2");

        let outcome = scanner(100).scan(&[dir.path().to_path_buf()]);
        let mut paths: Vec<_> = outcome.records.iter().map(|r| &r.path).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), outcome.records.len());
    }
}
