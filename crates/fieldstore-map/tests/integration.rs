//! Integration tests: FieldMap over a live FieldStore.
//!
//! These tests exercise the full adapter -> store pipeline, asserting the
//! one-document-per-key invariant against the underlying table itself.

use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;

use fieldstore_core::{has_field, single_field, Config, FieldStore};
use fieldstore_map::{FieldMap, MapError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn memory_store() -> Arc<FieldStore> {
    Arc::new(FieldStore::open(Config::memory()).unwrap())
}

fn seeded_store(pairs: &[(&str, Value)]) -> Arc<FieldStore> {
    let store = memory_store();
    for (key, value) in pairs {
        store.insert(single_field(*key, value.clone())).unwrap();
    }
    store
}

fn assert_stored_once(store: &FieldStore, key: &str, value: &Value) {
    let matches = store.search(&has_field(key));
    assert_eq!(matches.len(), 1, "key {} should occupy exactly one document", key);
    assert_eq!(matches[0].fields.get(key), Some(value));
    assert_eq!(matches[0].fields.len(), 1);
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

#[test]
fn test_get_with_value_in_store() {
    let store = seeded_store(&[("name", json!(10))]);
    let map = FieldMap::new(store);
    assert_eq!(map.get("name").unwrap(), json!(10));
}

#[test]
fn test_get_missing_key() {
    let map = FieldMap::new(memory_store());
    match map.get("item_not_in_db") {
        Err(MapError::KeyNotFound { key }) => assert_eq!(key, "item_not_in_db"),
        other => panic!("Expected KeyNotFound, got {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

#[test]
fn test_set_item() {
    let store = memory_store();
    let map = FieldMap::new(Arc::clone(&store));

    map.set("name", json!("value")).unwrap();
    assert_stored_once(&store, "name", &json!("value"));
}

#[test]
fn test_set_item_to_two_different_values() {
    let store = memory_store();
    let map = FieldMap::new(Arc::clone(&store));

    map.set("name", json!("initial_value")).unwrap();
    map.set("name", json!("value")).unwrap();
    assert_stored_once(&store, "name", &json!("value"));
}

#[test]
fn test_set_item_twice() {
    let store = memory_store();
    let map = FieldMap::new(Arc::clone(&store));

    map.set("name", json!("value")).unwrap();
    map.set("name", json!("value")).unwrap();
    assert_stored_once(&store, "name", &json!("value"));
}

#[test]
fn test_set_item_with_config_passed_directly() {
    let map = FieldMap::open(Config::memory()).unwrap();
    map.set("name", json!("value")).unwrap();
    assert_eq!(map.get("name").unwrap(), json!("value"));
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn test_conflicting_construction_store_then_config() {
    let store = memory_store();
    let result = FieldMap::builder().store(store).config(Config::memory()).build();
    assert!(matches!(result, Err(MapError::ConflictingConstruction)));
}

#[test]
fn test_conflicting_construction_config_then_store() {
    let store = memory_store();
    let result = FieldMap::builder().config(Config::memory()).store(store).build();
    assert!(matches!(result, Err(MapError::ConflictingConstruction)));
}

#[test]
fn test_builder_with_store_only() {
    let store = seeded_store(&[("name", json!(10))]);
    let map = FieldMap::builder().store(store).build().unwrap();
    assert_eq!(map.get("name").unwrap(), json!(10));
}

#[test]
fn test_builder_with_config_only() {
    let map = FieldMap::builder().config(Config::memory()).build().unwrap();
    map.set("name", json!(10)).unwrap();
    assert_eq!(map.len(), 1);
}

// ---------------------------------------------------------------------------
// Length & membership
// ---------------------------------------------------------------------------

#[test]
fn test_length() {
    let store = seeded_store(&[("key1", json!(1)), ("key2", json!(2))]);
    let map = FieldMap::new(store);
    assert_eq!(map.len(), 2);
}

#[test]
fn test_contains_key() {
    let store = seeded_store(&[("key1", json!(1))]);
    let map = FieldMap::new(store);
    assert!(map.contains_key("key1"));
    assert!(!map.contains_key("key2"));
}

#[test]
fn test_keys_and_entries_in_insertion_order() {
    let store = seeded_store(&[("key1", json!(1)), ("key2", json!(2))]);
    let map = FieldMap::new(store);

    assert_eq!(map.keys(), vec!["key1".to_string(), "key2".to_string()]);
    assert_eq!(
        map.entries(),
        vec![("key1".to_string(), json!(1)), ("key2".to_string(), json!(2))]
    );
}

// ---------------------------------------------------------------------------
// End-to-end scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_empty_store_set_get_len() {
    let map = FieldMap::open(Config::memory()).unwrap();
    assert!(map.is_empty());

    map.set("name", json!("value")).unwrap();
    assert_eq!(map.get("name").unwrap(), json!("value"));
    assert_eq!(map.len(), 1);
}

#[test]
fn test_many_overwrites_keep_single_document() {
    let store = memory_store();
    let map = FieldMap::new(Arc::clone(&store));

    for i in 0..20 {
        map.set("counter", json!(i)).unwrap();
    }
    assert_stored_once(&store, "counter", &json!(19));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_remove_through_adapter() {
    let store = seeded_store(&[("key1", json!(1)), ("key2", json!(2))]);
    let map = FieldMap::new(Arc::clone(&store));

    assert_eq!(map.remove("key1").unwrap(), json!(1));
    assert_eq!(map.len(), 1);
    assert!(store.search(&has_field("key1")).is_empty());
}

#[test]
fn test_duplicate_key_is_an_error_not_a_pick() {
    let store = memory_store();
    store.insert(single_field("name", json!(1))).unwrap();
    store.insert(single_field("name", json!(2))).unwrap();

    let map = FieldMap::new(store);
    match map.get("name") {
        Err(MapError::DuplicateKey { count, .. }) => assert_eq!(count, 2),
        other => panic!("Expected DuplicateKey, got {:?}", other),
    }
}

#[test]
fn test_file_backed_map_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("map.json");

    {
        let map = FieldMap::open(Config::file(&path)).unwrap();
        map.set("name", json!("value")).unwrap();
        map.set("count", json!(3)).unwrap();
        map.set("count", json!(4)).unwrap();
    }
    {
        let map = FieldMap::open(Config::file(&path)).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("name").unwrap(), json!("value"));
        assert_eq!(map.get("count").unwrap(), json!(4));
    }
}
