//! # Sync Module
//!
//! Mirrors an audio library into a normalized destination tree.
//!
//! ## Overview
//!
//! Every run recomputes the full plan from scratch:
//! - Listing the source and destination trees
//! - Renaming source files from their tags
//! - Diffing against the destination by path and size
//! - Checking free space before anything is written
//! - Copying what is missing or changed
//!
//! ## Components
//!
//! - **Tree Scanner** (`scanner`): Recursive listing with an extension allow-list
//! - **Filter** (`filter`): Whitelist/blacklist on tag fields
//! - **Path Transformer** (`transform`): Destination subfolder and file name rules
//! - **Diff Engine** (`diff`): Pairs transformed entries with the destination listing
//! - **Disk Space** (`disk_space`): Admission control against the destination volume
//! - **Sync Executor** (`executor`): Sequential copy with per-file error collection
//! - **Sync Coordinator** (`coordinator`): Runs the stages and talks to the user

pub mod coordinator;
pub mod diff;
pub mod disk_space;
pub mod error;
pub mod executor;
pub mod filter;
pub mod models;
pub mod scanner;
pub mod transform;

pub use coordinator::SyncCoordinator;
pub use diff::diff;
pub use disk_space::{check_space, needed_space};
pub use error::{Result, SyncError};
pub use executor::execute;
pub use filter::Filter;
pub use models::{DiskSpaceReport, FileEntry, SyncFile, SyncOutcome, TransformedEntry};
pub use scanner::{scan, scan_both, ScanFilter, TreeScan};
pub use transform::{file_name, sanitize, subfolder, PathTransformer};
