//! Mapping adapter for fieldstore
//!
//! Exposes a `FieldStore` document table as a key/value map: lookup,
//! assignment, length, membership, enumeration.
//!
//! # Architecture
//!
//! A map entry is stored as one single-field document `{key: value}`.
//! The bridge works as follows:
//! - `get` searches for documents carrying the key as a field name
//! - `set` updates the existing document in place when the key already
//!   exists and inserts a fresh document otherwise, so a key never
//!   occupies more than one document
//! - `len` and `contains_key` pass through to the table's count and
//!   membership checks
//!
//! Construction either wraps a caller-supplied store handle or forwards
//! configuration to build one internally — never both at once.

pub mod error;
pub mod map;

pub use error::{MapError, MapResult};
pub use map::{FieldMap, FieldMapBuilder};
