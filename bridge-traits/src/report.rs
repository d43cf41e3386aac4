//! Progress and Status Reporting
//!
//! The core reports what it is doing through [`SyncObserver`] using plain data
//! only (counts, paths, byte totals, durations). Formatting, colors and
//! progress bars are the implementor's business.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// One entry of the sync plan, as shown to the user before syncing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCopy {
    /// File in the source tree
    pub source: PathBuf,
    /// Target path in the destination tree
    pub destination: PathBuf,
    /// Size of the source file in bytes
    pub size: u64,
    /// Whether an existing destination file (with a different size) is replaced
    pub overwrite: bool,
}

/// Free, needed and remaining bytes on the destination volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskSpaceSummary {
    pub free: u64,
    pub needed: u64,
    /// `free - needed`, negative when the plan does not fit
    pub left: i64,
}

/// Observer for sync progress
///
/// Every method has an empty default so implementors only override what they
/// display. Calls happen on the coordinating task, in run order.
pub trait SyncObserver: Send + Sync {
    /// A tree scan finished
    fn scan_finished(&self, _root: &Path, _files: usize, _elapsed: Duration) {}

    /// Filtering and path transformation finished
    fn transform_finished(&self, _scanned: usize, _transformed: usize, _elapsed: Duration) {}

    /// Per-file errors were collected and written to `log_file`
    fn errors_logged(&self, _count: usize, _log_file: &Path) {}

    /// The user asked to see the collected errors
    fn show_errors(&self, _errors: &[String]) {}

    /// The user asked to see the plan
    fn show_plan(&self, _plan: &[PlannedCopy]) {}

    /// Disk space was computed for the plan
    fn disk_space(&self, _summary: &DiskSpaceSummary) {}

    /// The executor is about to process `total` files
    fn sync_started(&self, _total: usize) {}

    /// One plan entry was processed (`ok == false` when the copy failed)
    fn file_processed(&self, _destination: &Path, _ok: bool) {}

    /// The executor finished
    fn sync_finished(&self, _synced: usize, _failed: usize, _elapsed: Duration) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SyncObserver for NoopObserver {}
