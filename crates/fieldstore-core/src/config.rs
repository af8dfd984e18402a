//! Configuration management for fieldstore
//!
//! Selects the snapshot backend and the persistence discipline for a store.

use std::path::PathBuf;

/// Where a store persists its snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// RAM only. Contents are dropped with the store.
    Memory,
    /// JSON snapshot at the given path, replaced atomically on flush.
    File(PathBuf),
}

/// Fieldstore configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Snapshot backend
    pub backend: Backend,
    /// Flush the snapshot after every mutating call
    pub flush_every_write: bool,
    /// fsync the snapshot file before renaming it into place
    pub durable_sync: bool,
    /// Create missing parent directories for a file backend
    pub create_parent_dirs: bool,
}

impl Config {
    /// RAM-only store, nothing persisted.
    pub fn memory() -> Self {
        Self {
            backend: Backend::Memory,
            flush_every_write: true,
            durable_sync: false,
            create_parent_dirs: true,
        }
    }

    /// File-backed store with a JSON snapshot at `path`.
    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            backend: Backend::File(path.into()),
            flush_every_write: true,
            durable_sync: false,
            create_parent_dirs: true,
        }
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if let Backend::File(path) = &self.backend {
            if path.as_os_str().is_empty() {
                return Err("file backend requires a non-empty path".into());
            }
        }
        if self.durable_sync && !self.flush_every_write {
            return Err("durable_sync requires flush_every_write".into());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self { Self::memory() }
}
