//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for terminal use on desktop
//! platforms (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! This crate provides the collaborators the sync core talks to:
//! - `Prompt` using `dialoguer` (`TerminalPrompt`) or a fixed "yes" (`AssumeYes`)
//! - `SyncObserver` using `console` colors and an `indicatif` progress bar
//! - `ErrorLog` writing timestamped files with `tokio::fs`
//! - `DiskSpaceProbe` using `fs2`
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{ConsoleReporter, FileErrorLog, Fs2DiskSpaceProbe, TerminalPrompt};
//! use std::sync::Arc;
//!
//! let prompt = Arc::new(TerminalPrompt::new());
//! let reporter = Arc::new(ConsoleReporter::new());
//! let error_log = Arc::new(FileErrorLog::new("logs"));
//! let disk = Arc::new(Fs2DiskSpaceProbe::new());
//! ```

mod disk;
mod error_log;
mod prompt;
mod reporter;

pub use disk::Fs2DiskSpaceProbe;
pub use error_log::{FileErrorLog, LOG_FILE_NAME_FORMAT};
pub use prompt::{AssumeYes, TerminalPrompt};
pub use reporter::ConsoleReporter;
