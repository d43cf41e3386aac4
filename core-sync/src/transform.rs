//! # Path Transformer
//!
//! Computes the canonical destination path of a source file from its tag.
//!
//! ## Overview
//!
//! The destination is `<destination_root>/<subfolder>/<file name>`:
//!
//! - **Subfolder**: the uppercased first character of the first path segment
//!   below the source root when it is a letter `A`-`Z`, `#` for anything else,
//!   `default` when there is no segment at all
//! - **File name**: artist, album (with the year in parentheses), disk, track
//!   and title joined with `" - "`, skipping empty parts, followed by the
//!   original extension
//!
//! Characters that are unsafe in file names on common file systems are
//! replaced by [`sanitize`].

use core_metadata::{Tag, TagExtractor};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{Result, SyncError};
use crate::filter::Filter;
use crate::models::{FileEntry, TransformedEntry};

pub const DEFAULT_SUBFOLDER: &str = "default";
pub const NUMERIC_SUBFOLDER: &str = "#";

const PART_SEPARATOR: &str = " - ";

const REPLACEMENTS: &[(char, &str)] = &[
    (':', ";"),
    ('\\', ""),
    ('/', ""),
    ('?', "¿"),
    ('"', ","),
    ('\'', ","),
    ('*', "x"),
    ('+', "x"),
    ('[', "("),
    (']', ")"),
    ('>', "-"),
    ('<', "-"),
    ('|', "-"),
];

/// Replace characters that are not safe in file names
pub fn sanitize(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    for c in name.chars() {
        match REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => sanitized.push_str(to),
            None => sanitized.push(c),
        }
    }
    sanitized
}

/// Letter bucket for a path relative to the source root
pub fn subfolder(relative: &Path) -> String {
    let first = relative.components().find_map(|component| match component {
        Component::Normal(segment) => Some(segment.to_string_lossy()),
        _ => None,
    });

    let Some(segment) = first else {
        return DEFAULT_SUBFOLDER.to_string();
    };

    let Some(c) = segment.chars().next() else {
        return DEFAULT_SUBFOLDER.to_string();
    };

    let upper: String = c.to_uppercase().collect();
    match upper.as_bytes() {
        [b] if b.is_ascii_uppercase() => upper,
        _ => NUMERIC_SUBFOLDER.to_string(),
    }
}

/// File name built from the tag, without sanitization
///
/// `extension` is appended verbatim and should include its dot. Returns
/// `None` when the tag carries none of the naming fields.
pub fn file_name(tag: &Tag, extension: &str) -> Option<String> {
    let mut parts: Vec<String> = Vec::with_capacity(5);

    if !tag.artist.is_empty() {
        parts.push(tag.artist.clone());
    }

    if !tag.album.is_empty() {
        if tag.year.is_empty() {
            parts.push(tag.album.clone());
        } else {
            parts.push(format!("{} ({})", tag.album, tag.year));
        }
    }

    if !tag.disk_number.is_empty() {
        parts.push(tag.disk_number.clone());
    }

    if !tag.track_number.is_empty() {
        if tag.track_number.chars().count() == 1 {
            parts.push(format!("0{}", tag.track_number));
        } else {
            parts.push(tag.track_number.clone());
        }
    }

    if !tag.title.is_empty() {
        parts.push(tag.title.clone());
    }

    if parts.is_empty() {
        return None;
    }

    Some(format!("{}{}", parts.join(PART_SEPARATOR), extension))
}

/// Maps source files to their destination paths
#[derive(Debug, Clone)]
pub struct PathTransformer {
    source_root: PathBuf,
    destination_root: PathBuf,
    filter: Filter,
}

impl PathTransformer {
    pub fn new(
        source_root: impl Into<PathBuf>,
        destination_root: impl Into<PathBuf>,
        filter: Filter,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            destination_root: destination_root.into(),
            filter,
        }
    }

    /// Destination path for `entry`, or `None` when the filter rejects it
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::TagParse`] if the tag cannot be read or has no
    /// usable fields.
    pub async fn transform(
        &self,
        entry: &FileEntry,
        extractor: &dyn TagExtractor,
    ) -> Result<Option<PathBuf>> {
        let tag = extractor
            .extract_tag(&entry.path)
            .await
            .map_err(|e| SyncError::TagParse {
                path: entry.path.display().to_string(),
                message: e.to_string(),
            })?;

        if !self.filter.allows(&tag) {
            debug!("Filtered out: {}", entry.path.display());
            return Ok(None);
        }

        let extension = entry
            .path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let name = file_name(&tag, &extension).ok_or_else(|| SyncError::TagParse {
            path: entry.path.display().to_string(),
            message: "no usable tag fields".to_string(),
        })?;

        let relative = entry
            .path
            .strip_prefix(&self.source_root)
            .unwrap_or(Path::new(""));

        Ok(Some(
            self.destination_root
                .join(subfolder(relative))
                .join(sanitize(&name)),
        ))
    }

    /// Transform every entry, collecting per-file errors
    ///
    /// Output order follows input order. Filtered entries appear in neither
    /// list.
    pub async fn transform_all(
        &self,
        entries: &[FileEntry],
        extractor: &dyn TagExtractor,
    ) -> (Vec<TransformedEntry>, Vec<SyncError>) {
        let mut transformed = Vec::with_capacity(entries.len());
        let mut errors = Vec::new();

        for entry in entries {
            match self.transform(entry, extractor).await {
                Ok(Some(destination)) => transformed.push(TransformedEntry {
                    source: entry.clone(),
                    destination,
                }),
                Ok(None) => {}
                Err(e) => {
                    warn!("{}", e);
                    errors.push(e);
                }
            }
        }

        info!(
            "Transformed {} of {} files ({} errors)",
            transformed.len(),
            entries.len(),
            errors.len()
        );

        (transformed, errors)
    }
}
