//! Diff engine: decides which transformed entries need a copy.

use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::models::{FileEntry, SyncFile, TransformedEntry};

/// Pair every transformed entry with the destination listing
///
/// Lookup is by exact path. Entries already in sync are dropped; the rest
/// keep their input order.
pub fn diff(transformed: &[TransformedEntry], destination: &[FileEntry]) -> Vec<SyncFile> {
    let existing: HashMap<&Path, &FileEntry> = destination
        .iter()
        .map(|entry| (entry.path.as_path(), entry))
        .collect();

    let plan: Vec<SyncFile> = transformed
        .iter()
        .map(|entry| {
            let current = existing
                .get(entry.destination.as_path())
                .map(|found| (*found).clone())
                .unwrap_or_else(FileEntry::absent);
            SyncFile::new(entry.source.clone(), current, entry.destination.clone())
        })
        .filter(|file| !file.is_in_sync())
        .collect();

    debug!("{} of {} files need syncing", plan.len(), transformed.len());

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn transformed(source: &str, size: u64, destination: &str) -> TransformedEntry {
        TransformedEntry {
            source: FileEntry::new(source, size),
            destination: PathBuf::from(destination),
        }
    }

    #[test]
    fn test_missing_destination_is_planned() {
        let plan = diff(&[transformed("/src/a.mp3", 10, "/dst/A/a.mp3")], &[]);

        assert_eq!(plan.len(), 1);
        assert!(!plan[0].destination.exists());
        assert_eq!(plan[0].target, PathBuf::from("/dst/A/a.mp3"));
    }

    #[test]
    fn test_equal_size_is_skipped() {
        let plan = diff(
            &[transformed("/src/a.mp3", 10, "/dst/A/a.mp3")],
            &[FileEntry::new("/dst/A/a.mp3", 10)],
        );
        assert!(plan.is_empty());
    }

    #[test]
    fn test_size_change_is_overwrite() {
        let plan = diff(
            &[transformed("/src/a.mp3", 10, "/dst/A/a.mp3")],
            &[FileEntry::new("/dst/A/a.mp3", 9)],
        );

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].destination.size, 9);
        assert!(plan[0].to_planned_copy().overwrite);
    }

    #[test]
    fn test_order_follows_input() {
        let plan = diff(
            &[
                transformed("/src/c.mp3", 3, "/dst/C/c.mp3"),
                transformed("/src/a.mp3", 1, "/dst/A/a.mp3"),
                transformed("/src/b.mp3", 2, "/dst/B/b.mp3"),
            ],
            &[FileEntry::new("/dst/A/a.mp3", 1)],
        );

        let sources: Vec<_> = plan.iter().map(|f| f.source.path.clone()).collect();
        assert_eq!(
            sources,
            vec![PathBuf::from("/src/c.mp3"), PathBuf::from("/src/b.mp3")]
        );
    }
}
