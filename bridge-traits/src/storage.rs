//! Storage Abstractions
//!
//! Error log persistence and free-space queries.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Error log writer trait
///
/// Persists the messages of per-file errors so that the user can inspect them
/// after the run.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::ErrorLog;
///
/// async fn persist(log: &dyn ErrorLog, errors: &[String]) -> Result<()> {
///     let file = log.log_errors(errors).await?;
///     println!("logged errors in file {}", file.display());
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ErrorLog: Send + Sync {
    /// Append one line per message to a timestamped log file
    ///
    /// Returns the path of the file written. File names must sort lexically
    /// by creation time.
    async fn log_errors(&self, messages: &[String]) -> Result<PathBuf>;
}

/// Free space query trait
pub trait DiskSpaceProbe: Send + Sync {
    /// Bytes available to the current user on the volume backing `path`
    fn available_space(&self, path: &Path) -> Result<u64>;
}
