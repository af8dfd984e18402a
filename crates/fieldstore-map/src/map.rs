//! `FieldMap` — the mapping view over a document table.

use std::sync::Arc;

use serde_json::Value;

use fieldstore_core::{has_field, single_field, Config, FieldStore};

use crate::error::{MapError, MapResult};

/// Mapping view over a `FieldStore`.
///
/// Each entry is one single-field document `{key: value}` in the wrapped
/// table. The map holds its store handle for its whole lifetime; wrap the
/// same handle elsewhere only through the `Arc`.
pub struct FieldMap {
    store: Arc<FieldStore>,
}

impl FieldMap {
    /// Wrap a caller-supplied store handle.
    pub fn new(store: Arc<FieldStore>) -> Self {
        Self { store }
    }

    /// Build a new store from `config` and wrap it.
    pub fn open(config: Config) -> MapResult<Self> {
        let store = FieldStore::open(config)?;
        Ok(Self { store: Arc::new(store) })
    }

    /// Builder enforcing the mutually exclusive construction modes.
    pub fn builder() -> FieldMapBuilder {
        FieldMapBuilder::default()
    }

    /// The wrapped store handle.
    pub fn store(&self) -> &Arc<FieldStore> {
        &self.store
    }

    /// Value stored under `key`.
    ///
    /// Fails with `KeyNotFound` when no document carries the key and with
    /// `DuplicateKey` when more than one does — several documents for one
    /// key means the table was modified behind the adapter's back, and
    /// picking one silently would hide that.
    pub fn get(&self, key: &str) -> MapResult<Value> {
        let mut matches = self.store.search(&has_field(key));
        if matches.len() > 1 {
            return Err(MapError::DuplicateKey { key: key.to_string(), count: matches.len() });
        }
        match matches.pop().and_then(|doc| doc.fields.get(key).cloned()) {
            Some(value) => Ok(value),
            None => Err(MapError::KeyNotFound { key: key.to_string() }),
        }
    }

    /// Store `value` under `key`.
    ///
    /// When the key already exists its document is updated in place, so
    /// repeated calls never accumulate duplicates: after `set` returns,
    /// exactly one document carries the key.
    pub fn set<V: Into<Value>>(&self, key: &str, value: V) -> MapResult<()> {
        let query = has_field(key);
        let fields = single_field(key, value.into());
        if self.store.contains(&query) {
            self.store.update(&fields, &query)?;
        } else {
            self.store.insert(fields)?;
        }
        Ok(())
    }

    /// Remove `key`, returning the value it held.
    pub fn remove(&self, key: &str) -> MapResult<Value> {
        let value = self.get(key)?;
        self.store.remove(&has_field(key))?;
        Ok(value)
    }

    /// Whether any document carries `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.store.contains(&has_field(key))
    }

    /// Number of documents in the wrapped table.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if the wrapped table has no documents.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Every stored key, in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.store
            .all()
            .into_iter()
            .flat_map(|doc| doc.fields.into_iter().map(|(name, _)| name))
            .collect()
    }

    /// Every stored key/value pair, in insertion order.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.store
            .all()
            .into_iter()
            .flat_map(|doc| doc.fields.into_iter())
            .collect()
    }
}

impl std::fmt::Debug for FieldMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldMap")
            .field("entries", &self.store.len())
            .finish()
    }
}

/// Builder for `FieldMap`.
///
/// Accepts either a pre-built store handle or configuration to build one
/// internally — supplying both fails at `build()`.
#[derive(Default)]
pub struct FieldMapBuilder {
    store: Option<Arc<FieldStore>>,
    config: Option<Config>,
}

impl FieldMapBuilder {
    /// Use a pre-built store handle.
    pub fn store(mut self, store: Arc<FieldStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build a new store from this configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Finish construction.
    ///
    /// Fails with `ConflictingConstruction` when both a store handle and
    /// configuration were supplied, regardless of the order the setters
    /// ran in. With neither, an in-memory store is built.
    pub fn build(self) -> MapResult<FieldMap> {
        match (self.store, self.config) {
            (Some(_), Some(_)) => Err(MapError::ConflictingConstruction),
            (Some(store), None) => Ok(FieldMap::new(store)),
            (None, Some(config)) => FieldMap::open(config),
            (None, None) => FieldMap::open(Config::memory()),
        }
    }
}
