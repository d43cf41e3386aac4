//! Error log writer using Tokio

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    storage::ErrorLog,
    time::{Clock, SystemClock},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// `chrono` format of log file stems, e.g. `20240102-030405`
pub const LOG_FILE_NAME_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Writes error lines to `<dir>/<timestamp>.log`
///
/// The directory is created on first use. Writing twice within the same
/// second appends to the same file.
pub struct FileErrorLog {
    dir: PathBuf,
    clock: Arc<dyn Clock>,
}

impl FileErrorLog {
    /// Create an error log in `dir` stamped with the system clock (UTC)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_clock(dir, Arc::new(SystemClock))
    }

    pub fn with_clock(dir: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            dir: dir.into(),
            clock,
        }
    }

    /// Path of the file the next write goes to
    pub fn current_file(&self) -> PathBuf {
        let stamp = self.clock.now().format(LOG_FILE_NAME_FORMAT);
        self.dir.join(format!("{}.log", stamp))
    }

    fn map_io_error(path: &Path, e: std::io::Error) -> BridgeError {
        BridgeError::OperationFailed(format!("{}: {}", path.display(), e))
    }
}

#[async_trait]
impl ErrorLog for FileErrorLog {
    async fn log_errors(&self, messages: &[String]) -> Result<PathBuf> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .await
                .map_err(|e| Self::map_io_error(&self.dir, e))?;
            debug!(path = ?self.dir, "Created log directory");
        }

        let path = self.current_file();
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| Self::map_io_error(&path, e))?;

        let mut contents = String::new();
        for message in messages {
            contents.push_str(message);
            contents.push('\n');
        }

        file.write_all(contents.as_bytes())
            .await
            .map_err(|e| Self::map_io_error(&path, e))?;
        file.flush().await.map_err(|e| Self::map_io_error(&path, e))?;

        debug!(path = ?path, lines = messages.len(), "Appended to error log");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::time::FixedClock;
    use chrono::{TimeZone, Utc};

    fn fixed_clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        ))
    }

    #[test]
    fn test_file_name_uses_clock() {
        let log = FileErrorLog::with_clock("logs", fixed_clock());
        assert_eq!(
            log.current_file(),
            PathBuf::from("logs").join("20240102-030405.log")
        );
    }

    #[tokio::test]
    async fn test_creates_directory_and_writes_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested/logs");
        let log = FileErrorLog::with_clock(&log_dir, fixed_clock());

        let path = log
            .log_errors(&["first".to_string(), "second".to_string()])
            .await
            .unwrap();

        assert_eq!(path, log_dir.join("20240102-030405.log"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[tokio::test]
    async fn test_same_second_appends() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileErrorLog::with_clock(dir.path(), fixed_clock());

        log.log_errors(&["transform".to_string()]).await.unwrap();
        let path = log.log_errors(&["copy".to_string()]).await.unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "transform\ncopy\n");
    }

    #[tokio::test]
    async fn test_unwritable_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        let log = FileErrorLog::with_clock(blocker.join("logs"), fixed_clock());
        assert!(log.log_errors(&["x".to_string()]).await.is_err());
    }
}
