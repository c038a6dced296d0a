//! Error and warning types for codestatslib

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Errors that stop a statistics run before it starts.
#[derive(Error, Debug)]
pub enum CodeStatsError {
    /// The root path does not exist or is not a directory
    #[error("invalid root '{path}': {reason}")]
    InvalidRoot { path: PathBuf, reason: String },

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to build the counting worker pool
    #[error("failed to start worker pool: {0}")]
    WorkerPool(String),
}

/// Category of a non-fatal problem met during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A file could not be opened or read; it is left out of every count.
    UnreadableFile,
    /// A directory could not be listed; its subtree is skipped.
    InaccessibleDirectory,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::UnreadableFile => write!(f, "unreadable file"),
            WarningKind::InaccessibleDirectory => write!(f, "inaccessible directory"),
        }
    }
}

/// A non-fatal problem recorded during a run, with the offending path and cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub path: PathBuf,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn unreadable_file(path: &Path, cause: &CodeStatsError) -> Self {
        let message = match cause {
            CodeStatsError::FileRead { source, .. } => source.to_string(),
            other => other.to_string(),
        };
        Self::new(WarningKind::UnreadableFile, path, message)
    }

    pub fn inaccessible_directory(path: &Path, cause: impl fmt::Display) -> Self {
        Self::new(WarningKind::InaccessibleDirectory, path, cause.to_string())
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}': {}", self.kind, self.path.display(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_invalid_root_message() {
        let err = CodeStatsError::InvalidRoot {
            path: PathBuf::from("/nope"),
            reason: "path does not exist".to_string(),
        };
        assert_eq!(err.to_string(), "invalid root '/nope': path does not exist");
    }

    #[test]
    fn test_unreadable_file_warning_keeps_cause() {
        let path = Path::new("src/locked.rs");
        let err = CodeStatsError::FileRead {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        let warning = Warning::unreadable_file(path, &err);

        assert_eq!(warning.kind, WarningKind::UnreadableFile);
        assert_eq!(warning.path, path);
        assert_eq!(warning.message, "permission denied");
        assert_eq!(
            warning.to_string(),
            "unreadable file 'src/locked.rs': permission denied"
        );
    }
}
