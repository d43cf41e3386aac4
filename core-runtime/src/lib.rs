//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for mp3sync:
//! - Logging and tracing infrastructure
//! - Configuration loading and validation
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that the binary sets up before
//! the sync core runs. The core itself only receives a validated
//! [`SyncConfig`](config::SyncConfig) and emits `tracing` events.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{FilterConfig, SyncConfig};
pub use error::{Error, Result};
