//! Typed queries over documents.
//!
//! A `Query` is a small tree of field predicates evaluated against one
//! document at a time. Stores run queries with a full scan of the RAM
//! working set — there is no index.

use serde_json::Value;

use crate::document::Document;

/// A query tree matched against individual documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Document carries the named field
    FieldExists(String),
    /// Named field is present and equal to the value
    FieldEq(String, Value),
    /// All sub-queries match
    And(Vec<Query>),
    /// At least one sub-query matches
    Or(Vec<Query>),
    /// Sub-query does not match
    Not(Box<Query>),
}

impl Query {
    /// Evaluate the query against a single document.
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Query::FieldExists(name) => doc.contains_key(name),
            Query::FieldEq(name, value) => doc.get(name) == Some(value),
            Query::And(queries) => queries.iter().all(|q| q.matches(doc)),
            Query::Or(queries) => queries.iter().any(|q| q.matches(doc)),
            Query::Not(query) => !query.matches(doc),
        }
    }

    /// Both this query and `other` must match.
    pub fn and(self, other: Query) -> Query {
        match self {
            Query::And(mut queries) => {
                queries.push(other);
                Query::And(queries)
            }
            query => Query::And(vec![query, other]),
        }
    }

    /// Either this query or `other` must match.
    pub fn or(self, other: Query) -> Query {
        match self {
            Query::Or(mut queries) => {
                queries.push(other);
                Query::Or(queries)
            }
            query => Query::Or(vec![query, other]),
        }
    }

    /// Invert the query.
    pub fn negate(self) -> Query {
        Query::Not(Box::new(self))
    }
}

/// Match documents carrying the named field.
pub fn has_field<N: Into<String>>(name: N) -> Query {
    Query::FieldExists(name.into())
}

/// Match documents whose named field equals `value`.
pub fn field_eq<N, V>(name: N, value: V) -> Query
where
    N: Into<String>,
    V: Into<Value>,
{
    Query::FieldEq(name.into(), value.into())
}
