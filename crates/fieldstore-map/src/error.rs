//! Error types for the mapping adapter

use std::fmt;
use std::error::Error;

use fieldstore_core::StoreError;

/// Mapping adapter error types
#[derive(Debug)]
pub enum MapError {
    /// No document carries the requested key
    KeyNotFound {
        /// The key that was looked up
        key: String,
    },

    /// More than one document carries the key.
    ///
    /// `set` keeps at most one document per key, so this means the
    /// underlying table was modified behind the adapter's back.
    DuplicateKey {
        /// The key that was looked up
        key: String,
        /// How many documents carry it
        count: usize,
    },

    /// Builder was given both a pre-built store handle and storage
    /// configuration
    ConflictingConstruction,

    /// Failure in the underlying store, passed through unchanged
    Store(StoreError),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::KeyNotFound { key } => {
                write!(f, "Key not found: {}", key)
            }

            MapError::DuplicateKey { key, count } => {
                write!(f, "Key {} is carried by {} documents, expected at most one", key, count)
            }

            MapError::ConflictingConstruction => {
                write!(f, "Pass either a store handle or storage configuration, not both")
            }

            MapError::Store(err) => {
                write!(f, "Store error: {}", err)
            }
        }
    }
}

impl Error for MapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MapError::Store(err) => Some(err),
            _ => None,
        }
    }
}

/// Propagate underlying store failures unchanged
impl From<StoreError> for MapError {
    fn from(err: StoreError) -> Self {
        MapError::Store(err)
    }
}

/// Result type alias for mapping adapter operations
pub type MapResult<T> = Result<T, MapError>;
