//! Sync executor: copies the plan one file at a time.

use bridge_traits::report::SyncObserver;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::SyncError;
use crate::models::SyncFile;

/// Copy every planned file, creating directories and overwriting as needed
///
/// A failed copy is recorded and the batch carries on. The observer gets one
/// tick per entry.
pub async fn execute(plan: &[SyncFile], observer: &dyn SyncObserver) -> Vec<SyncError> {
    let mut errors = Vec::new();

    for file in plan {
        let result = copy_file(file).await;
        observer.file_processed(file.target(), result.is_ok());

        if let Err(e) = result {
            warn!("{}", e);
            errors.push(e);
        }
    }

    errors
}

async fn copy_file(file: &SyncFile) -> Result<(), SyncError> {
    let copy_error = |message: String| SyncError::Copy {
        source_path: file.source.path.display().to_string(),
        destination: file.target.display().to_string(),
        message,
    };

    if let Some(parent) = file.target.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| copy_error(format!("failed to create directory: {}", e)))?;
    }

    let bytes = fs::copy(&file.source.path, &file.target)
        .await
        .map_err(|e| copy_error(e.to_string()))?;

    debug!(
        "Copied {} -> {} ({} bytes)",
        file.source.path.display(),
        file.target.display(),
        bytes
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileEntry;
    use bridge_traits::report::NoopObserver;
    use std::fs as stdfs;

    #[tokio::test]
    async fn test_execute_creates_directories_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("src.mp3");
        let existing = dir.path().join("dst/Q/existing.mp3");
        let fresh = dir.path().join("dst/A/new.mp3");
        stdfs::write(&source, b"new content").unwrap();
        stdfs::create_dir_all(existing.parent().unwrap()).unwrap();
        stdfs::write(&existing, b"old").unwrap();

        let plan = vec![
            SyncFile::new(FileEntry::new(&source, 11), FileEntry::absent(), &fresh),
            SyncFile::new(
                FileEntry::new(&source, 11),
                FileEntry::new(&existing, 3),
                &existing,
            ),
        ];

        let errors = execute(&plan, &NoopObserver).await;

        assert!(errors.is_empty());
        assert_eq!(stdfs::read(&fresh).unwrap(), b"new content");
        assert_eq!(stdfs::read(&existing).unwrap(), b"new content");
    }

    #[tokio::test]
    async fn test_execute_missing_source_is_copy_error() {
        let dir = tempfile::tempdir().unwrap();
        let plan = vec![SyncFile::new(
            FileEntry::new(dir.path().join("gone.mp3"), 1),
            FileEntry::absent(),
            dir.path().join("out/gone.mp3"),
        )];

        let errors = execute(&plan, &NoopObserver).await;

        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], SyncError::Copy { .. }));
    }
}
