use bridge_traits::error::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("failed to scan {path}: {message}")]
    Scan { path: String, message: String },

    #[error("scan task failed: {0}")]
    ScanTask(String),

    #[error("failed to parse tag from {path}: {message}")]
    TagParse { path: String, message: String },

    #[error("failed to copy {source_path} to {destination}: {message}")]
    Copy {
        source_path: String,
        destination: String,
        message: String,
    },

    #[error("failed to read disk info: {0}")]
    DiskInfo(String),

    #[error("not enough disk space: needed {needed} bytes, free {free} bytes, left {left} bytes")]
    InsufficientDiskSpace { needed: u64, free: u64, left: i64 },

    #[error("failed to write log file: {0}")]
    ErrorLog(String),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("aborted by user")]
    Aborted,
}

impl SyncError {
    /// The user declined a confirmation prompt
    pub fn is_user_abort(&self) -> bool {
        matches!(self, SyncError::Aborted)
    }

    /// Errors that affect a single file and never stop the batch
    pub fn is_per_file(&self) -> bool {
        matches!(self, SyncError::TagParse { .. } | SyncError::Copy { .. })
    }
}

impl From<core_runtime::Error> for SyncError {
    fn from(err: core_runtime::Error) -> Self {
        SyncError::Config(err.to_string())
    }
}

impl From<BridgeError> for SyncError {
    fn from(err: BridgeError) -> Self {
        SyncError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_abort_is_not_per_file() {
        assert!(SyncError::Aborted.is_user_abort());
        assert!(!SyncError::Aborted.is_per_file());
    }

    #[test]
    fn test_per_file_errors() {
        let tag = SyncError::TagParse {
            path: "a.mp3".to_string(),
            message: "no tag".to_string(),
        };
        let copy = SyncError::Copy {
            source_path: "a.mp3".to_string(),
            destination: "b.mp3".to_string(),
            message: "denied".to_string(),
        };

        assert!(tag.is_per_file());
        assert!(copy.is_per_file());
        assert!(!SyncError::DiskInfo("gone".to_string()).is_per_file());
    }

    #[test]
    fn test_insufficient_space_message() {
        let err = SyncError::InsufficientDiskSpace {
            needed: 1001,
            free: 1000,
            left: -1,
        };
        assert_eq!(
            err.to_string(),
            "not enough disk space: needed 1001 bytes, free 1000 bytes, left -1 bytes"
        );
    }
}
