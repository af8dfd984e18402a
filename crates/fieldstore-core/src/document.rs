//! Document model: named fields holding JSON values.

use serde_json::Value;

/// Identifier assigned to a document by the store.
///
/// Ids are monotonically increasing and never reused within one store
/// lifetime, so ascending id order equals insertion order.
pub type DocId = u64;

/// A document is a set of named fields.
pub type Document = serde_json::Map<String, Value>;

/// A document together with its store-assigned id, as returned by searches
/// and enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Store-assigned id
    pub id: DocId,
    /// The document's fields
    pub fields: Document,
}

impl StoredDocument {
    /// Value of a single field, if present.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Build a document holding a single field.
pub fn single_field<N, V>(name: N, value: V) -> Document
where
    N: Into<String>,
    V: Into<Value>,
{
    let mut fields = Document::new();
    fields.insert(name.into(), value.into());
    fields
}
