//! Data types shared by the sync stages.
//!
//! Every value here lives for a single run. Listings are produced by the
//! scanner, transformed entries by the path transformer, and the plan by the
//! diff engine.

use bridge_traits::report::{DiskSpaceSummary, PlannedCopy};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// A single file found while walking a tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileEntry {
    /// Full path of the file. Empty for the "does not exist" sentinel.
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Last modification time, when the platform reports one
    pub modified: Option<DateTime<Utc>>,
    pub is_dir: bool,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
            modified: None,
            is_dir: false,
        }
    }

    /// Sentinel for a destination file that is not there yet
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn exists(&self) -> bool {
        !self.path.as_os_str().is_empty()
    }
}

/// A source entry paired with the destination path computed from its tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedEntry {
    pub source: FileEntry,
    pub destination: PathBuf,
}

/// One unit of the sync plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFile {
    pub source: FileEntry,
    /// Existing destination file, or [`FileEntry::absent`]
    pub destination: FileEntry,
    /// Where the source gets copied to
    pub target: PathBuf,
}

impl SyncFile {
    pub fn new(source: FileEntry, destination: FileEntry, target: impl Into<PathBuf>) -> Self {
        Self {
            source,
            destination,
            target: target.into(),
        }
    }

    /// True when the destination exists and has the same size as the source
    pub fn is_in_sync(&self) -> bool {
        self.destination.exists() && self.source.size == self.destination.size
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn to_planned_copy(&self) -> PlannedCopy {
        PlannedCopy {
            source: self.source.path.clone(),
            destination: self.target.clone(),
            size: self.source.size,
            overwrite: self.destination.exists(),
        }
    }
}

/// Free space of the destination volume against what the plan needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskSpaceReport {
    pub free: u64,
    pub needed: u64,
    pub left: i64,
}

impl DiskSpaceReport {
    pub fn new(free: u64, needed: u64) -> Self {
        let left = i128::from(free) - i128::from(needed);
        let left = left.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;
        Self { free, needed, left }
    }

    pub fn is_admissible(&self) -> bool {
        self.left >= 1
    }

    pub fn summary(&self) -> DiskSpaceSummary {
        DiskSpaceSummary {
            free: self.free,
            needed: self.needed,
            left: self.left,
        }
    }
}

/// Counters reported once a run is over
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Files found in the source tree after the extension filter
    pub scanned: usize,
    /// Source files that produced a destination path
    pub transformed: usize,
    /// Files that were out of sync
    pub planned: usize,
    /// Files copied successfully
    pub synced: usize,
    /// Per-file errors across the transform and copy stages
    pub errors: usize,
    /// Last error log written during the run
    pub log_file: Option<PathBuf>,
}

impl SyncOutcome {
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_sync_with_equal_sizes() {
        let file = SyncFile::new(
            FileEntry::new("/src/a.mp3", 42),
            FileEntry::new("/dst/A/a.mp3", 42),
            "/dst/A/a.mp3",
        );
        assert!(file.is_in_sync());
    }

    #[test]
    fn test_not_in_sync_when_sizes_differ() {
        let file = SyncFile::new(
            FileEntry::new("/src/a.mp3", 42),
            FileEntry::new("/dst/A/a.mp3", 41),
            "/dst/A/a.mp3",
        );
        assert!(!file.is_in_sync());
        assert!(file.to_planned_copy().overwrite);
    }

    #[test]
    fn test_absent_destination_is_never_in_sync() {
        // Zero-sized source against the sentinel still needs a copy
        let file = SyncFile::new(
            FileEntry::new("/src/a.mp3", 0),
            FileEntry::absent(),
            "/dst/A/a.mp3",
        );
        assert!(!file.is_in_sync());

        let planned = file.to_planned_copy();
        assert!(!planned.overwrite);
        assert_eq!(planned.destination, PathBuf::from("/dst/A/a.mp3"));
    }

    #[test]
    fn test_disk_space_report_left() {
        let report = DiskSpaceReport::new(1000, 1001);
        assert_eq!(report.left, -1);
        assert!(!report.is_admissible());

        assert!(!DiskSpaceReport::new(1000, 1000).is_admissible());
        assert!(DiskSpaceReport::new(1000, 999).is_admissible());
    }

    #[test]
    fn test_disk_space_report_clamps() {
        let report = DiskSpaceReport::new(0, u64::MAX);
        assert_eq!(report.left, i64::MIN);
    }
}
