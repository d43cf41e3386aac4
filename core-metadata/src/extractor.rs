//! Audio Tag Extraction
//!
//! This module reads the fields that drive file naming (artist, album, year,
//! disk, track, title) from audio files using the `lofty` crate. It supports
//! ID3v2, Vorbis Comments, MP4 tags and FLAC.
//!
//! ## Overview
//!
//! - Prefers the primary tag of the format, falls back to the first tag found
//! - Trims surrounding whitespace; inner text is kept as tagged
//! - Keeps the raw TPOS/TRCK text of ID3v2 tags (`"01"`, `"5/12"`, `"A1"`)
//! - Renders disk and track numbers of other formats as `"1"` or `"1/2"`
//! - Skips audio property parsing; only the tag is needed
//!
//! ## Usage
//!
//! ```ignore
//! use core_metadata::extractor::{MetadataExtractor, TagExtractor};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = MetadataExtractor::new();
//! let tag = extractor.extract_tag(Path::new("song.mp3")).await?;
//!
//! println!("{} - {}", tag.artist, tag.title);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use lofty::config::ParseOptions;
use lofty::file::{AudioFile, FileType, TaggedFileExt};
use lofty::id3::v2::{FrameId, Id3v2Tag};
use lofty::mpeg::MpegFile;
use lofty::probe::Probe;
use lofty::tag::Accessor;
use std::borrow::Cow;
use std::io::{Cursor, ErrorKind};
use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::error::{MetadataError, Result};

/// ID3v2 part-of-a-set frame
const DISK_FRAME: &str = "TPOS";
/// ID3v2 track number frame
const TRACK_FRAME: &str = "TRCK";

/// Tag fields used to build destination file names.
///
/// Every field is a plain string and may be empty when the source file does
/// not carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    pub artist: String,
    pub album: String,
    pub year: String,
    /// Disk number frame text, e.g. `"1"` or `"1/2"`
    pub disk_number: String,
    /// Track number frame text, e.g. `"5"` or `"5/12"`
    pub track_number: String,
    pub title: String,
}

impl Tag {
    /// Look up a field by its filter name (`artist`, `album`, `year`, `disk`,
    /// `track`, `title`). Unknown names yield `None`.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name.to_lowercase().as_str() {
            "artist" => Some(&self.artist),
            "album" => Some(&self.album),
            "year" => Some(&self.year),
            "disk" => Some(&self.disk_number),
            "track" => Some(&self.track_number),
            "title" => Some(&self.title),
            _ => None,
        }
    }

    /// Check if no field carries a value
    pub fn is_empty(&self) -> bool {
        self.artist.is_empty()
            && self.album.is_empty()
            && self.year.is_empty()
            && self.disk_number.is_empty()
            && self.track_number.is_empty()
            && self.title.is_empty()
    }
}

/// Tag extractor trait
///
/// Abstracts tag reading so the sync core can be driven by in-memory tags.
#[async_trait]
pub trait TagExtractor: Send + Sync {
    /// Read the tag of the file at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, its format cannot be
    /// parsed or it carries no tag at all.
    async fn extract_tag(&self, path: &Path) -> Result<Tag>;
}

/// Audio metadata extractor
///
/// Extracts tags from audio files using the `lofty` crate.
pub struct MetadataExtractor {
    /// Parse options for lofty
    parse_options: ParseOptions,
}

impl MetadataExtractor {
    /// Create a new metadata extractor that skips audio properties
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::new().read_properties(false),
        }
    }

    fn field_text(value: Option<Cow<'_, str>>) -> String {
        value.map(|s| s.trim().to_string()).unwrap_or_default()
    }

    /// Raw TPOS and TRCK text of an MPEG file's ID3v2 tag
    ///
    /// Returns `None` when the file carries no ID3v2 tag.
    fn id3v2_number_frames(&self, data: &[u8]) -> Result<Option<(String, String)>> {
        let mpeg = MpegFile::read_from(&mut Cursor::new(data), self.parse_options).map_err(|e| {
            MetadataError::ExtractionFailed(format!("Failed to parse MPEG file: {}", e))
        })?;

        Ok(mpeg.id3v2().map(|tag| {
            (
                Self::frame_text(tag, DISK_FRAME),
                Self::frame_text(tag, TRACK_FRAME),
            )
        }))
    }

    fn frame_text(tag: &Id3v2Tag, id: &'static str) -> String {
        tag.get_text(&FrameId::Valid(Cow::Borrowed(id)))
            .map(|text| text.trim().to_string())
            .unwrap_or_default()
    }

    /// Render a number/total pair for formats without TRCK/TPOS text
    fn number_text(number: Option<u32>, total: Option<u32>) -> String {
        match (number, total) {
            (Some(n), Some(t)) => format!("{}/{}", n, t),
            (Some(n), None) => n.to_string(),
            (None, _) => String::new(),
        }
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TagExtractor for MetadataExtractor {
    async fn extract_tag(&self, path: &Path) -> Result<Tag> {
        debug!("Extracting tag from: {}", path.display());

        let file_data = fs::read(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => MetadataError::FileNotFound(path.display().to_string()),
            _ => MetadataError::ExtractionFailed(format!("Failed to read file: {}", e)),
        })?;

        let tagged_file = Probe::new(Cursor::new(&file_data))
            .options(self.parse_options)
            .guess_file_type()
            .map_err(|e| MetadataError::ExtractionFailed(format!("Failed to probe file: {}", e)))?
            .read()
            .map_err(|e| MetadataError::ExtractionFailed(format!("Failed to parse file: {}", e)))?;

        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .ok_or_else(|| MetadataError::NoTag(path.display().to_string()))?;

        let id3v2_frames = match tagged_file.file_type() {
            FileType::Mpeg => self.id3v2_number_frames(&file_data)?,
            _ => None,
        };
        let (disk_number, track_number) = id3v2_frames.unwrap_or_else(|| {
            (
                Self::number_text(tag.disk(), tag.disk_total()),
                Self::number_text(tag.track(), tag.track_total()),
            )
        });

        Ok(Tag {
            artist: Self::field_text(tag.artist()),
            album: Self::field_text(tag.album()),
            year: tag.year().map(|y| y.to_string()).unwrap_or_default(),
            disk_number,
            track_number,
            title: Self::field_text(tag.title()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_text_trims_only() {
        assert_eq!(
            MetadataExtractor::field_text(Some(Cow::Borrowed("  Greatest  Hits  "))),
            "Greatest  Hits"
        );
        assert_eq!(MetadataExtractor::field_text(None), "");
    }

    #[test]
    fn test_number_text() {
        assert_eq!(MetadataExtractor::number_text(Some(5), None), "5");
        assert_eq!(MetadataExtractor::number_text(Some(5), Some(12)), "5/12");
        assert_eq!(MetadataExtractor::number_text(None, Some(12)), "");
        assert_eq!(MetadataExtractor::number_text(None, None), "");
    }

    #[test]
    fn test_tag_field_lookup() {
        let tag = Tag {
            artist: "Queen".to_string(),
            album: "Greatest Hits".to_string(),
            year: "1981".to_string(),
            disk_number: "1/2".to_string(),
            track_number: "5".to_string(),
            title: "Bohemian Rhapsody".to_string(),
        };

        assert_eq!(tag.field("artist"), Some("Queen"));
        assert_eq!(tag.field("Album"), Some("Greatest Hits"));
        assert_eq!(tag.field("disk"), Some("1/2"));
        assert_eq!(tag.field("track"), Some("5"));
        assert_eq!(tag.field("genre"), None);
        assert!(!tag.is_empty());
    }

    #[test]
    fn test_default_tag_is_empty() {
        assert!(Tag::default().is_empty());
    }

    #[test]
    fn test_metadata_extractor_default() {
        let extractor1 = MetadataExtractor::new();
        let extractor2 = MetadataExtractor::default();

        assert_eq!(
            format!("{:?}", extractor1.parse_options),
            format!("{:?}", extractor2.parse_options)
        );
    }
}
