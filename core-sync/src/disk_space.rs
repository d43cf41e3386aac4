//! Disk-space admission control for a sync plan.

use bridge_traits::storage::DiskSpaceProbe;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{Result, SyncError};
use crate::models::{DiskSpaceReport, SyncFile};

/// Bytes the plan writes
///
/// Overwritten files are not subtracted, so this overestimates what an
/// overwrite-heavy plan actually consumes.
pub fn needed_space(plan: &[SyncFile]) -> u64 {
    plan.iter()
        .fold(0u64, |total, file| total.saturating_add(file.source.size))
}

/// Measure the plan against the free space of the destination volume
///
/// # Errors
///
/// Returns [`SyncError::DiskInfo`] if the probe fails.
pub fn check_space(
    plan: &[SyncFile],
    destination_root: &Path,
    probe: &dyn DiskSpaceProbe,
) -> Result<DiskSpaceReport> {
    let free = probe
        .available_space(destination_root)
        .map_err(|e| SyncError::DiskInfo(format!("{}: {}", destination_root.display(), e)))?;

    let report = DiskSpaceReport::new(free, needed_space(plan));
    info!(
        free = report.free,
        needed = report.needed,
        left = report.left,
        "Disk space checked"
    );
    Ok(report)
}

impl DiskSpaceReport {
    /// Fail unless at least one byte is left after the sync
    pub fn ensure_admissible(&self) -> Result<()> {
        if self.is_admissible() {
            return Ok(());
        }

        warn!("Not enough disk space: {} bytes left", self.left);
        Err(SyncError::InsufficientDiskSpace {
            needed: self.needed,
            free: self.free,
            left: self.left,
        })
    }
}
