//! Snapshot storage backends.
//!
//! A `Storage` persists the full table state and hands it back on open.
//! Two backends ship with the crate: `MemoryStorage` keeps the latest
//! snapshot in RAM, `FileStorage` writes a JSON file and replaces it
//! atomically via a sibling temp file and rename.

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::document::{DocId, Document};
use crate::error::{StoreError, StoreResult};

/// Full table state: the RAM working set and the snapshot wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableState {
    /// Id handed to the next insert
    pub next_id: DocId,
    /// All live documents, keyed by id
    pub documents: HashMap<DocId, Document>,
}

impl Default for TableState {
    fn default() -> Self {
        // Ids start at 1; 0 is never assigned.
        Self { next_id: 1, documents: HashMap::new() }
    }
}

/// Snapshot persistence backend.
pub trait Storage: Send {
    /// Last flushed state, or `None` if nothing was ever flushed.
    fn load(&mut self) -> StoreResult<Option<TableState>>;

    /// Persist the full state.
    fn flush(&mut self, state: &TableState) -> StoreResult<()>;
}

/// Keeps the latest snapshot in RAM.
///
/// Load-after-flush round trips, which is enough to hand a table between
/// stores within one process and to exercise persistence in tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    snapshot: Option<TableState>,
}

impl MemoryStorage {
    /// Empty storage with no snapshot.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&mut self) -> StoreResult<Option<TableState>> {
        Ok(self.snapshot.clone())
    }

    fn flush(&mut self, state: &TableState) -> StoreResult<()> {
        self.snapshot = Some(state.clone());
        Ok(())
    }
}

/// JSON snapshot on disk.
///
/// Flush writes the serialized state to `<path>.tmp`, optionally fsyncs it,
/// then renames over the target. A crash mid-flush leaves the previous
/// snapshot intact.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    durable_sync: bool,
    create_parent_dirs: bool,
}

impl FileStorage {
    /// Storage at `path` with default options (no fsync, create parents).
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self::with_options(path, false, true)
    }

    /// Storage at `path` with explicit durability options.
    pub fn with_options<P: Into<PathBuf>>(
        path: P,
        durable_sync: bool,
        create_parent_dirs: bool,
    ) -> Self {
        Self {
            path: path.into(),
            durable_sync,
            create_parent_dirs,
        }
    }

    /// Snapshot path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl Storage for FileStorage {
    fn load(&mut self) -> StoreResult<Option<TableState>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Io {
                    path: Some(self.path.clone()),
                    kind: e.kind(),
                    message: format!("Failed to read snapshot: {}", e),
                })
            }
        };

        if bytes.is_empty() {
            return Ok(None);
        }

        serde_json::from_slice(&bytes).map(Some).map_err(|e| {
            StoreError::SnapshotCorrupted {
                path: self.path.clone(),
                reason: e.to_string(),
            }
        })
    }

    fn flush(&mut self, state: &TableState) -> StoreResult<()> {
        if self.create_parent_dirs {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                        path: Some(parent.to_path_buf()),
                        kind: e.kind(),
                        message: format!("Failed to create snapshot directory: {}", e),
                    })?;
                }
            }
        }

        let bytes = serde_json::to_vec(state).map_err(|e| StoreError::Io {
            path: Some(self.path.clone()),
            kind: std::io::ErrorKind::InvalidData,
            message: format!("Failed to encode snapshot: {}", e),
        })?;

        let tmp = self.temp_path();
        {
            let mut file = File::create(&tmp).map_err(|e| StoreError::Io {
                path: Some(tmp.clone()),
                kind: e.kind(),
                message: format!("Failed to create snapshot temp file: {}", e),
            })?;
            file.write_all(&bytes).map_err(|e| StoreError::Io {
                path: Some(tmp.clone()),
                kind: e.kind(),
                message: format!("Failed to write snapshot: {}", e),
            })?;
            if self.durable_sync {
                file.sync_all().map_err(|e| StoreError::Io {
                    path: Some(tmp.clone()),
                    kind: e.kind(),
                    message: format!("Failed to sync snapshot: {}", e),
                })?;
            }
        }

        fs::rename(&tmp, &self.path).map_err(|e| StoreError::Io {
            path: Some(self.path.clone()),
            kind: e.kind(),
            message: format!("Failed to replace snapshot: {}", e),
        })
    }
}
