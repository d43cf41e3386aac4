//! # Metadata Module
//!
//! Reads the embedded tag of an audio file.
//!
//! ## Overview
//!
//! This module handles:
//! - Audio tag extraction (ID3, Vorbis, MP4, FLAC) via `lofty`
//! - Raw disk/track frame text for ID3v2 tags
//!
//! The sync core only sees the [`TagExtractor`](extractor::TagExtractor)
//! trait, so tests can feed it tags without real audio files.

pub mod error;
pub mod extractor;

pub use error::{MetadataError, Result};
pub use extractor::{MetadataExtractor, Tag, TagExtractor};
