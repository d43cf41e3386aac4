//! Free disk space via `fs2`

use bridge_traits::{error::Result, storage::DiskSpaceProbe};
use std::path::Path;
use tracing::debug;

/// Reports the space available to the current user on the volume of a path
#[derive(Debug, Default, Clone, Copy)]
pub struct Fs2DiskSpaceProbe;

impl Fs2DiskSpaceProbe {
    pub fn new() -> Self {
        Self
    }
}

impl DiskSpaceProbe for Fs2DiskSpaceProbe {
    fn available_space(&self, path: &Path) -> Result<u64> {
        let free = fs2::available_space(path)?;
        debug!(path = ?path, free, "Queried free disk space");
        Ok(free)
    }
}
