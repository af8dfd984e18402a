//! Fieldstore Core — Embedded Field-Addressable Document Store
//!
//! A small document table engine where the full table lives in RAM and a
//! pluggable storage backend persists JSON snapshots.
//!
//! # Architecture
//!
//! - **Read path**: served from the RAM table (RwLock read lock)
//! - **Write path**: snapshot-first — the mutated state is flushed to
//!   storage before it replaces the RAM working set
//! - **Queries**: typed field-existence/equality trees, evaluated per
//!   document with a full scan
//!
//! # No Mapping Assumptions
//!
//! This crate has no notion of keys or uniqueness. Documents are plain
//! field sets and duplicates are allowed. Mapping-shaped views live in
//! separate crates (e.g. fieldstore-map).

pub mod config;
pub mod document;
pub mod error;
pub mod query;
pub mod storage;
pub mod store;

// Re-export key types for convenience
pub use config::{Backend, Config};
pub use document::{single_field, DocId, Document, StoredDocument};
pub use error::{StoreError, StoreResult};
pub use query::{field_eq, has_field, Query};
pub use storage::{FileStorage, MemoryStorage, Storage, TableState};
pub use store::FieldStore;
