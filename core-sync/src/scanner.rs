//! # Tree Scanner
//!
//! Walks a directory tree and produces a flat listing of its regular files.
//!
//! ## Overview
//!
//! - Directories are traversed but never emitted
//! - Entries come out sorted by file name within each directory
//! - An optional [`ScanFilter`] restricts the listing to known extensions
//! - [`scan_both`] walks the source and destination trees on two blocking
//!   tasks and joins them
//!
//! ## Usage
//!
//! ```ignore
//! use core_sync::scanner::{scan_both, ScanFilter};
//!
//! let filter = ScanFilter::new(["mp3"]);
//! let (source, destination) = scan_both(source_root, Some(filter), destination_root).await?;
//! println!("{} source files in {:?}", source.entries.len(), source.elapsed);
//! ```

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Result, SyncError};
use crate::models::FileEntry;

/// Case-insensitive extension allow-list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFilter {
    extensions: Vec<String>,
}

impl ScanFilter {
    /// Build a filter from extensions with or without the leading dot.
    /// An empty list admits every file.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    /// Admit every file
    pub fn any() -> Self {
        Self {
            extensions: Vec::new(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn allows(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }

        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|allowed| *allowed == ext)
            })
            .unwrap_or(false)
    }
}

impl Default for ScanFilter {
    fn default() -> Self {
        Self::new(["mp3"])
    }
}

/// Listing of one tree and the time it took to walk it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeScan {
    pub entries: Vec<FileEntry>,
    pub elapsed: Duration,
}

fn timed_scan(root: &Path, filter: Option<&ScanFilter>) -> Result<TreeScan> {
    let started = Instant::now();
    let entries = scan(root, filter)?;
    Ok(TreeScan {
        entries,
        elapsed: started.elapsed(),
    })
}

/// List every regular file under `root`
///
/// # Errors
///
/// - [`SyncError::PathNotFound`] if `root` does not exist
/// - [`SyncError::Scan`] on any traversal error; partial results are dropped
pub fn scan(root: &Path, filter: Option<&ScanFilter>) -> Result<Vec<FileEntry>> {
    if !root.exists() {
        return Err(SyncError::PathNotFound(root.display().to_string()));
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| SyncError::Scan {
            path: e.path().unwrap_or(root).display().to_string(),
            message: e.to_string(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(filter) = filter {
            if !filter.allows(entry.path()) {
                debug!("Skipping by extension: {}", entry.path().display());
                continue;
            }
        }

        let metadata = entry.metadata().map_err(|e| SyncError::Scan {
            path: entry.path().display().to_string(),
            message: e.to_string(),
        })?;

        entries.push(FileEntry {
            path: entry.into_path(),
            size: metadata.len(),
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            is_dir: false,
        });
    }

    info!("Scanned {} files in {}", entries.len(), root.display());
    Ok(entries)
}

/// Scan the source (filtered) and destination (unfiltered) trees at once
///
/// Both scans always run to completion. When both fail, the source failure
/// is returned, whether it is a scan error or a failed task.
pub async fn scan_both(
    source: PathBuf,
    filter: Option<ScanFilter>,
    destination: PathBuf,
) -> Result<(TreeScan, TreeScan)> {
    let source_task = tokio::task::spawn_blocking(move || timed_scan(&source, filter.as_ref()));
    let destination_task = tokio::task::spawn_blocking(move || timed_scan(&destination, None));

    let source_joined = source_task.await;
    let destination_joined = destination_task.await;

    let source = source_joined.map_err(|e| SyncError::ScanTask(e.to_string()))??;
    let destination = destination_joined.map_err(|e| SyncError::ScanTask(e.to_string()))??;

    Ok((source, destination))
}
