//! Error types for fieldstore operations
//!
//! All fieldstore errors are represented by the StoreError enum, which
//! provides detailed context for debugging and recovery.

use std::fmt;
use std::error::Error;
use std::path::PathBuf;

/// Fieldstore error types with detailed context
#[derive(Debug)]
pub enum StoreError {
    /// I/O operation failed
    Io {
        /// The file path where the error occurred
        path: Option<PathBuf>,
        /// The underlying I/O error kind
        kind: std::io::ErrorKind,
        /// Human-readable description
        message: String,
    },

    /// Snapshot file exists but cannot be decoded
    SnapshotCorrupted {
        /// Path to the corrupted snapshot
        path: PathBuf,
        /// Description of the decode failure
        reason: String,
    },

    /// Configuration rejected at open time
    InvalidConfig {
        /// What was wrong with the configuration
        reason: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, kind, message } => {
                if let Some(path) = path {
                    write!(f, "I/O error in {}: {} ({})", path.display(), message, kind)
                } else {
                    write!(f, "I/O error: {} ({})", message, kind)
                }
            }

            StoreError::SnapshotCorrupted { path, reason } => {
                write!(f, "Snapshot corrupted in {}: {}", path.display(), reason)
            }

            StoreError::InvalidConfig { reason } => {
                write!(f, "Invalid configuration: {}", reason)
            }
        }
    }
}

impl Error for StoreError {}

/// Convert std::io::Error to StoreError::Io
impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io {
            path: None,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for fieldstore operations
pub type StoreResult<T> = Result<T, StoreError>;
