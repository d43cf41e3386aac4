//! # Sync Configuration Module
//!
//! Provides the configuration consumed by the sync core.
//!
//! ## Overview
//!
//! A [`SyncConfig`] names the source tree, the destination tree, the audio file
//! extensions to pick up from the source and the tag filter. It is usually
//! loaded from a JSON file next to the binary:
//!
//! ```json
//! {
//!   "source": "/music/incoming",
//!   "destination": "/mnt/player",
//!   "extensions": ["mp3"],
//!   "logDir": "logs",
//!   "filter": {
//!     "whitelist": { "artist": ["Queen"] },
//!     "blacklist": { "album": ["Live Killers"] }
//!   }
//! }
//! ```
//!
//! Only `source` and `destination` are required.
//!
//! ## Usage
//!
//! ### Loading from a file
//!
//! ```ignore
//! use core_runtime::config::SyncConfig;
//!
//! let config = SyncConfig::load("config.json")?;
//! println!("Source: {}", config.source.display());
//! ```
//!
//! ### Building in code
//!
//! ```
//! use core_runtime::config::SyncConfig;
//!
//! let config = SyncConfig::builder()
//!     .source("/music/incoming")
//!     .destination("/mnt/player")
//!     .blacklist("genre", ["Audiobook"])
//!     .build();
//!
//! // "genre" is not a filterable tag field
//! assert!(config.is_err());
//! ```
//!
//! ## Error Handling
//!
//! Every failure is reported as [`Error::Config`] with a message that names the
//! offending field or file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Tag fields that may appear as keys in a filter list
pub const FILTER_FIELDS: &[&str] = &["artist", "album", "year", "disk", "track", "title"];

/// Default error log directory, relative to the working directory
pub const DEFAULT_LOG_DIR: &str = "logs";

fn default_extensions() -> Vec<String> {
    vec!["mp3".to_string()]
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_DIR)
}

/// Whitelist and blacklist of tag values, keyed by tag field name.
///
/// An empty whitelist admits every file. The blacklist always takes
/// precedence over the whitelist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub whitelist: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub blacklist: BTreeMap<String, Vec<String>>,
}

impl FilterConfig {
    /// Check that both lists only use known tag field names
    pub fn validate(&self) -> Result<()> {
        for (list, entries) in [("whitelist", &self.whitelist), ("blacklist", &self.blacklist)] {
            for field in entries.keys() {
                if !FILTER_FIELDS.contains(&field.to_lowercase().as_str()) {
                    return Err(Error::Config(format!(
                        "Unknown tag field '{}' in filter {}. Allowed fields: {}",
                        field,
                        list,
                        FILTER_FIELDS.join(", ")
                    )));
                }
            }
        }
        Ok(())
    }

    /// Check if neither list has any entries
    pub fn is_empty(&self) -> bool {
        self.whitelist.values().all(Vec::is_empty) && self.blacklist.values().all(Vec::is_empty)
    }
}

/// Configuration of a sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    /// Root of the library to read from
    pub source: PathBuf,

    /// Root of the normalized tree to write to
    pub destination: PathBuf,

    /// Tag filter applied to source files
    #[serde(default)]
    pub filter: FilterConfig,

    /// File extensions (without dot, case-insensitive) picked up from the
    /// source tree. An empty list picks up every file.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory receiving the per-run error log files
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl SyncConfig {
    /// Creates a new builder for constructing a `SyncConfig`.
    pub fn builder() -> SyncConfigBuilder {
        SyncConfigBuilder::default()
    }

    /// Loads and validates a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_json(&raw).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{} ({})", msg, path.display())),
            other => other,
        })
    }

    /// Parses and validates a configuration from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self> {
        let mut config: SyncConfig = serde_json::from_str(raw)
            .map_err(|e| Error::Config(format!("Invalid config JSON: {}", e)))?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Source and destination paths are not empty
    /// - Source and destination are distinct and not nested in each other
    /// - Extensions are not blank
    /// - Filter lists only reference known tag fields
    pub fn validate(&self) -> Result<()> {
        if self.source.as_os_str().is_empty() {
            return Err(Error::Config("Source path cannot be empty".to_string()));
        }

        if self.destination.as_os_str().is_empty() {
            return Err(Error::Config("Destination path cannot be empty".to_string()));
        }

        if self.source == self.destination {
            return Err(Error::Config(
                "Source and destination must be different directories".to_string(),
            ));
        }

        // A nested destination would be rescanned as part of the source
        if self.destination.starts_with(&self.source) || self.source.starts_with(&self.destination)
        {
            return Err(Error::Config(format!(
                "Source {} and destination {} must not be nested in each other",
                self.source.display(),
                self.destination.display()
            )));
        }

        if self.extensions.iter().any(|ext| ext.is_empty()) {
            return Err(Error::Config(
                "File extensions cannot be empty strings".to_string(),
            ));
        }

        if self.log_dir.as_os_str().is_empty() {
            return Err(Error::Config("Log directory cannot be empty".to_string()));
        }

        self.filter.validate()
    }

    /// Lowercases extensions and strips leading dots.
    fn normalize(&mut self) {
        for ext in &mut self.extensions {
            *ext = ext.trim().trim_start_matches('.').to_lowercase();
        }
    }
}

/// Builder for constructing [`SyncConfig`] instances.
#[derive(Debug, Default)]
pub struct SyncConfigBuilder {
    source: Option<PathBuf>,
    destination: Option<PathBuf>,
    filter: FilterConfig,
    extensions: Option<Vec<String>>,
    log_dir: Option<PathBuf>,
}

impl SyncConfigBuilder {
    /// Sets the source root.
    pub fn source<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Sets the destination root.
    pub fn destination<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.destination = Some(path.into());
        self
    }

    /// Adds allowed values for a tag field.
    pub fn whitelist<I, S>(mut self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter
            .whitelist
            .entry(field.to_string())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Adds denied values for a tag field.
    pub fn blacklist<I, S>(mut self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter
            .blacklist
            .entry(field.to_string())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Replaces the whole filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the source file extensions. Default: `["mp3"]`
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the error log directory. Default: `logs`
    pub fn log_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.log_dir = Some(path.into());
        self
    }

    /// Builds the final `SyncConfig` instance.
    pub fn build(self) -> Result<SyncConfig> {
        let source = self.source.ok_or_else(|| {
            Error::Config("Source path is required. Use .source() to set it.".to_string())
        })?;

        let destination = self.destination.ok_or_else(|| {
            Error::Config("Destination path is required. Use .destination() to set it.".to_string())
        })?;

        let mut config = SyncConfig {
            source,
            destination,
            filter: self.filter,
            extensions: self.extensions.unwrap_or_else(default_extensions),
            log_dir: self.log_dir.unwrap_or_else(default_log_dir),
        };

        config.normalize();
        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_json_minimal() {
        let config =
            SyncConfig::from_json(r#"{ "source": "/music/in", "destination": "/mnt/out" }"#)
                .unwrap();

        assert_eq!(config.source, PathBuf::from("/music/in"));
        assert_eq!(config.destination, PathBuf::from("/mnt/out"));
        assert_eq!(config.extensions, vec!["mp3".to_string()]);
        assert_eq!(config.log_dir, PathBuf::from(DEFAULT_LOG_DIR));
        assert!(config.filter.is_empty());
    }

    #[test]
    fn test_from_json_full() {
        let raw = r#"{
            "source": "/music/in",
            "destination": "/mnt/out",
            "extensions": [".MP3", "flac"],
            "logDir": "/var/log/mp3sync",
            "filter": {
                "whitelist": { "artist": ["Queen", "ABBA"] },
                "blacklist": { "album": ["Live Killers"] }
            }
        }"#;

        let config = SyncConfig::from_json(raw).unwrap();

        assert_eq!(config.extensions, vec!["mp3".to_string(), "flac".to_string()]);
        assert_eq!(config.log_dir, PathBuf::from("/var/log/mp3sync"));
        assert_eq!(config.filter.whitelist["artist"], vec!["Queen", "ABBA"]);
        assert_eq!(config.filter.blacklist["album"], vec!["Live Killers"]);
    }

    #[test]
    fn test_from_json_rejects_missing_destination() {
        let err = SyncConfig::from_json(r#"{ "source": "/music/in" }"#).unwrap_err();
        assert!(err.to_string().contains("destination"));
    }

    #[test]
    fn test_from_json_rejects_unknown_filter_field() {
        let raw = r#"{
            "source": "/music/in",
            "destination": "/mnt/out",
            "filter": { "blacklist": { "genre": ["Audiobook"] } }
        }"#;

        let err = SyncConfig::from_json(raw).unwrap_err();
        assert!(err.to_string().contains("genre"));
        assert!(err.to_string().contains("blacklist"));
    }

    #[test]
    fn test_filter_field_names_are_case_insensitive() {
        let config = SyncConfig::builder()
            .source("/music/in")
            .destination("/mnt/out")
            .whitelist("Artist", ["Queen"])
            .build();

        assert!(config.is_ok());
    }

    #[test]
    fn test_builder_requires_source() {
        let err = SyncConfig::builder()
            .destination("/mnt/out")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("Source path is required"));
    }

    #[test]
    fn test_builder_requires_destination() {
        let err = SyncConfig::builder().source("/music/in").build().unwrap_err();
        assert!(err.to_string().contains("Destination path is required"));
    }

    #[test]
    fn test_validate_rejects_identical_paths() {
        let err = SyncConfig::builder()
            .source("/music")
            .destination("/music")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("must be different"));
    }

    #[test]
    fn test_validate_rejects_nested_destination() {
        let err = SyncConfig::builder()
            .source("/music")
            .destination("/music/normalized")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("nested"));
    }

    #[test]
    fn test_validate_rejects_blank_extension() {
        let err = SyncConfig::builder()
            .source("/music/in")
            .destination("/mnt/out")
            .extensions(["mp3", " . "])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("extensions"));
    }

    #[test]
    fn test_builder_accumulates_filter_values() {
        let config = SyncConfig::builder()
            .source("/music/in")
            .destination("/mnt/out")
            .whitelist("artist", ["Queen"])
            .whitelist("artist", ["ABBA"])
            .build()
            .unwrap();

        assert_eq!(config.filter.whitelist["artist"], vec!["Queen", "ABBA"]);
        assert!(!config.filter.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "source": "/music/in", "destination": "/mnt/out", "extensions": ["MP3"] }}"#
        )
        .unwrap();

        let config = SyncConfig::load(file.path()).unwrap();
        assert_eq!(config.extensions, vec!["mp3".to_string()]);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = SyncConfig::load("/definitely/not/here/config.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here/config.json"));
    }

    #[test]
    fn test_config_is_cloneable() {
        let config = SyncConfig::builder()
            .source("/music/in")
            .destination("/mnt/out")
            .build()
            .unwrap();

        assert_eq!(config.clone(), config);
    }
}
