//! # Host Bridge Traits
//!
//! Collaborator interfaces that the sync core consumes but does not implement.
//!
//! ## Overview
//!
//! The sync core (`core-sync`) never talks to a terminal or writes log files on
//! its own. Everything that depends on the host environment is expressed as a
//! trait in this crate and injected by the caller:
//!
//! ### User Interaction
//! - [`Prompt`](prompt::Prompt) - Ask the user a question, receive a raw answer
//! - [`SyncObserver`](report::SyncObserver) - Receive progress and summary data
//!
//! ### Storage
//! - [`ErrorLog`](storage::ErrorLog) - Persist per-file errors to a log file
//! - [`DiskSpaceProbe`](storage::DiskSpaceProbe) - Query free space of a volume
//!
//! ### Utilities
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop`    | ✅ Done |
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type. Host
//! implementations should convert their own errors into it and keep the
//! affected path in the message.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so they can be shared across the
//! scanning tasks and the coordinating task.

pub mod error;
pub mod prompt;
pub mod report;
pub mod storage;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use prompt::{Answer, Prompt};
pub use report::{DiskSpaceSummary, NoopObserver, PlannedCopy, SyncObserver};
pub use storage::{DiskSpaceProbe, ErrorLog};
pub use time::{Clock, FixedClock, LogLevel, SystemClock};
