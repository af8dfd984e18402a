//! The document table engine — the heart of fieldstore.
//!
//! `FieldStore` keeps the whole table in RAM and persists it through a
//! pluggable snapshot backend.
//!
//! **Read path**: RAM only (search/all/len take the read lock)
//! **Write path**: snapshot-first — stage the mutated state, flush it to
//! storage, then swap it into RAM
//! **Queries**: field predicate trees evaluated per document, full scan

use parking_lot::{Mutex, RwLock};

use crate::config::{Backend, Config};
use crate::document::{DocId, Document, StoredDocument};
use crate::error::{StoreError, StoreResult};
use crate::query::Query;
use crate::storage::{FileStorage, MemoryStorage, Storage, TableState};

/// Document table engine: RAM working set + snapshot storage.
///
/// All public methods take `&self` for shared access.
/// Multiple readers run `search()` simultaneously via RwLock.
/// Writers serialize through the write lock and flush through the
/// storage Mutex.
pub struct FieldStore {
    /// RAM working set — concurrent reads via RwLock
    state: RwLock<TableState>,
    /// Snapshot backend — single writer via Mutex
    storage: Mutex<Box<dyn Storage>>,
    /// Store configuration
    config: Config,
}

impl FieldStore {
    /// Open a store with the backend named by `config`.
    ///
    /// Loads any existing snapshot into RAM.
    pub fn open(config: Config) -> StoreResult<Self> {
        let storage: Box<dyn Storage> = match &config.backend {
            Backend::Memory => Box::new(MemoryStorage::new()),
            Backend::File(path) => Box::new(FileStorage::with_options(
                path.clone(),
                config.durable_sync,
                config.create_parent_dirs,
            )),
        };
        Self::with_storage(storage, config)
    }

    /// Open over a caller-supplied storage backend.
    ///
    /// The backend's last flushed state, if any, becomes the initial
    /// working set.
    pub fn with_storage(mut storage: Box<dyn Storage>, config: Config) -> StoreResult<Self> {
        config
            .validate()
            .map_err(|reason| StoreError::InvalidConfig { reason })?;

        let state = match storage.load()? {
            Some(state) => {
                log::info!("loaded {} documents from snapshot", state.documents.len());
                state
            }
            None => TableState::default(),
        };

        Ok(Self {
            state: RwLock::new(state),
            storage: Mutex::new(storage),
            config,
        })
    }

    /// Store configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Insert a document, returning its assigned id.
    pub fn insert(&self, fields: Document) -> StoreResult<DocId> {
        self.commit(|state| {
            let id = state.next_id;
            state.next_id += 1;
            state.documents.insert(id, fields);
            id
        })
    }

    /// All documents matching `query`, in ascending id order.
    pub fn search(&self, query: &Query) -> Vec<StoredDocument> {
        let state = self.state.read();
        let mut results: Vec<StoredDocument> = state
            .documents
            .iter()
            .filter(|(_, fields)| query.matches(fields))
            .map(|(id, fields)| StoredDocument { id: *id, fields: fields.clone() })
            .collect();
        results.sort_by_key(|doc| doc.id);
        results
    }

    /// Merge `fields` into every document matching `query`.
    ///
    /// Existing fields with the same names are overwritten. Returns the
    /// ids of the updated documents, ascending.
    pub fn update(&self, fields: &Document, query: &Query) -> StoreResult<Vec<DocId>> {
        self.commit(|state| {
            let mut updated = Vec::new();
            for (id, doc) in state.documents.iter_mut() {
                if query.matches(doc) {
                    for (name, value) in fields {
                        doc.insert(name.clone(), value.clone());
                    }
                    updated.push(*id);
                }
            }
            updated.sort_unstable();
            updated
        })
    }

    /// Delete every document matching `query`.
    ///
    /// Returns the ids of the removed documents, ascending. Ids are not
    /// reused afterwards.
    pub fn remove(&self, query: &Query) -> StoreResult<Vec<DocId>> {
        self.commit(|state| {
            let mut removed: Vec<DocId> = state
                .documents
                .iter()
                .filter(|(_, doc)| query.matches(doc))
                .map(|(id, _)| *id)
                .collect();
            removed.sort_unstable();
            for id in &removed {
                state.documents.remove(id);
            }
            removed
        })
    }

    /// Every document in the table, in ascending id order.
    pub fn all(&self) -> Vec<StoredDocument> {
        let state = self.state.read();
        let mut results: Vec<StoredDocument> = state
            .documents
            .iter()
            .map(|(id, fields)| StoredDocument { id: *id, fields: fields.clone() })
            .collect();
        results.sort_by_key(|doc| doc.id);
        results
    }

    /// Document with the given id, if it exists.
    pub fn get(&self, id: DocId) -> Option<StoredDocument> {
        let state = self.state.read();
        state
            .documents
            .get(&id)
            .map(|fields| StoredDocument { id, fields: fields.clone() })
    }

    /// Whether any document matches `query`.
    pub fn contains(&self, query: &Query) -> bool {
        let state = self.state.read();
        state.documents.values().any(|doc| query.matches(doc))
    }

    /// Number of documents in the table.
    pub fn len(&self) -> usize {
        let state = self.state.read();
        state.documents.len()
    }

    /// Returns true if the table has no documents.
    pub fn is_empty(&self) -> bool {
        let state = self.state.read();
        state.documents.is_empty()
    }

    /// Delete every document. The id counter keeps running.
    pub fn clear(&self) -> StoreResult<()> {
        self.commit(|state| {
            state.documents.clear();
        })
    }

    /// Flush the current state to the snapshot backend.
    ///
    /// Only needed when `flush_every_write` is off; mutating calls flush
    /// on their own otherwise.
    pub fn flush(&self) -> StoreResult<()> {
        let state = self.state.read();
        let mut storage = self.storage.lock();
        storage.flush(&state)
    }

    /// Apply a mutation with snapshot-first ordering.
    ///
    /// The mutation runs on a staged copy which is flushed before it
    /// replaces the RAM state. If the flush fails, RAM is NEVER modified.
    fn commit<T>(&self, mutate: impl FnOnce(&mut TableState) -> T) -> StoreResult<T> {
        let mut state = self.state.write();
        let mut staged = state.clone();
        let out = mutate(&mut staged);
        if self.config.flush_every_write {
            let mut storage = self.storage.lock();
            storage.flush(&staged)?;
        }
        *state = staged;
        Ok(out)
    }
}

impl std::fmt::Debug for FieldStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldStore")
            .field("documents", &self.len())
            .field("backend", &self.config.backend)
            .finish()
    }
}
