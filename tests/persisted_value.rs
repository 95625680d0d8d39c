mod common;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pokeinfo::persist::{
    Codec, CodecError, Fallback, KeyedPersistedValue, PersistError, PersistedValue, Update,
};
use pokeinfo::storage::{FileStore, KeyValueStore, MemoryStore};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    badges: Vec<String>,
    stats: BTreeMap<String, u32>,
    rival: Option<String>,
}

fn profile() -> Profile {
    Profile {
        name: "Ash".into(),
        badges: vec!["boulder".into(), "cascade".into()],
        stats: [("caught".to_string(), 12), ("seen".to_string(), 40)]
            .into_iter()
            .collect(),
        rival: Some("Gary".into()),
    }
}

fn counting_supplier<V: Send + 'static>(
    value: V,
) -> (Fallback<V>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let fallback = Fallback::with(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        value
    });
    (fallback, calls)
}

// -- Round trip ---------------------------------------------------------------

#[test]
fn written_value_is_restored_on_reinitialize() {
    let store = Arc::new(MemoryStore::new());

    {
        let mut value = PersistedValue::initialize(
            Arc::clone(&store),
            "profile",
            Fallback::value(Profile {
                name: String::new(),
                badges: vec![],
                stats: BTreeMap::new(),
                rival: None,
            }),
        )
        .unwrap();
        value.set(profile()).unwrap();
    }

    let (fallback, calls) = counting_supplier(Profile {
        name: "unused".into(),
        badges: vec![],
        stats: BTreeMap::new(),
        rival: None,
    });
    let restored = PersistedValue::initialize(Arc::clone(&store), "profile", fallback).unwrap();

    assert_eq!(restored.key(), "profile");
    assert_eq!(restored.get(), &profile());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn round_trip_through_file_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    {
        let store = FileStore::open(&path).unwrap();
        let mut value = PersistedValue::initialize(store, "n", Fallback::value(0u64)).unwrap();
        value.set(u64::MAX).unwrap();
    }

    let store = FileStore::open(&path).unwrap();
    let value = PersistedValue::initialize(store, "n", Fallback::value(0u64)).unwrap();
    assert_eq!(*value.get(), u64::MAX);
}

#[test]
fn updater_sees_latest_value() {
    let store = MemoryStore::new();
    let mut value = PersistedValue::initialize(&store, "count", Fallback::value(0i32)).unwrap();

    value.set(10).unwrap();
    value.update(|n| n + 1).unwrap();
    value.set_value(Update::apply(|n: &i32| n * 2)).unwrap();

    assert_eq!(*value.get(), 22);
    assert_eq!(store.get("count").unwrap().as_deref(), Some("22"));
}

// -- Corrupt entries ----------------------------------------------------------

#[test]
fn corrupt_entry_yields_fallback_and_is_purged() {
    let store = MemoryStore::with_entries([("name", "Ash")]);

    let value =
        PersistedValue::initialize(&store, "name", Fallback::value("fallback".to_string()))
            .unwrap();

    assert_eq!(value.get(), "fallback");
    assert!(!store.contains("name"));
}

#[test]
fn corrupt_entry_is_only_seen_once() {
    let store = MemoryStore::with_entries([("n", "{oops")]);

    let (first, first_calls) = counting_supplier(1u32);
    let _ = PersistedValue::initialize(&store, "n", first).unwrap();
    let (second, second_calls) = counting_supplier(2u32);
    let value = PersistedValue::initialize(&store, "n", second).unwrap();

    assert_eq!(*value.get(), 2);
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn type_mismatch_counts_as_corrupt() {
    let store = MemoryStore::with_entries([("n", "\"not a number\"")]);

    let value = PersistedValue::initialize(&store, "n", Fallback::value(5u32)).unwrap();

    assert_eq!(*value.get(), 5);
    assert!(!store.contains("n"));
}

// -- Fallback evaluation ------------------------------------------------------

#[test]
fn supplier_runs_once_when_absent() {
    let store = MemoryStore::new();
    let (fallback, calls) = counting_supplier(vec![1, 2, 3]);

    let value = PersistedValue::initialize(&store, "list", fallback).unwrap();

    assert_eq!(value.get(), &vec![1, 2, 3]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn default_fallback_uses_type_default() {
    let store = MemoryStore::new();
    let value: PersistedValue<String, _> =
        PersistedValue::initialize(&store, "s", Fallback::default()).unwrap();
    assert_eq!(value.get(), "");
}

// -- Custom codecs ------------------------------------------------------------

/// Stores numbers as plain decimal text instead of JSON.
struct DecimalCodec;

impl Codec<u32> for DecimalCodec {
    fn encode(&self, value: &u32) -> Result<String, CodecError> {
        Ok(value.to_string())
    }

    fn decode(&self, raw: &str) -> Result<u32, CodecError> {
        serde_json::from_str(raw.trim()).map_err(CodecError::Decode)
    }
}

#[test]
fn caller_supplied_codec_is_used() {
    let store = MemoryStore::with_entries([("n", " 41 ")]);
    let mut value =
        PersistedValue::with_codec(&store, "n", Fallback::value(0), DecimalCodec).unwrap();

    assert_eq!(*value.get(), 41);
    value.update(|n| n + 1).unwrap();
    assert_eq!(store.get("n").unwrap().as_deref(), Some("42"));
}

// -- Store failures -----------------------------------------------------------

#[test]
fn failed_write_keeps_previous_value() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    let store = FileStore::open(&path).unwrap();
    let mut value = PersistedValue::initialize(&store, "n", Fallback::value(1u32)).unwrap();

    // A directory where the data file should be makes every write fail.
    std::fs::create_dir(&path).unwrap();

    let err = value.set(2).unwrap_err();
    assert!(matches!(err, PersistError::Store { .. }));
    assert_eq!(*value.get(), 1);
}

// -- Key-change cleanup variant -----------------------------------------------

#[test]
fn keyed_value_tracks_key_changes_without_orphans() {
    let store = MemoryStore::new();
    let mut value =
        KeyedPersistedValue::initialize(&store, "draft:1", Fallback::value(String::new()))
            .unwrap();
    value.set("hello".into()).unwrap();

    value.set_key("draft:2").unwrap();
    value.set_key("draft:3").unwrap();
    assert_eq!(value.key(), "draft:3");

    assert_eq!(
        store.snapshot().into_iter().collect::<Vec<_>>(),
        vec![("draft:3".to_string(), "\"hello\"".to_string())]
    );

    drop(value);
    assert!(store.is_empty());
}

#[test]
fn keyed_value_loads_existing_entry_then_removes_it_on_drop() {
    let store = MemoryStore::with_entries([("k", "[1,2]")]);
    {
        let value = KeyedPersistedValue::initialize(&store, "k", Fallback::value(Vec::<u8>::new()))
            .unwrap();
        assert_eq!(value.get(), &vec![1, 2]);
    }
    assert!(!store.contains("k"));
}

#[test]
fn frozen_and_keyed_variants_differ_on_teardown() {
    let store = MemoryStore::new();
    {
        let mut frozen = PersistedValue::initialize(&store, "frozen", Fallback::value(0u8)).unwrap();
        let mut keyed = KeyedPersistedValue::initialize(&store, "keyed", Fallback::value(0u8)).unwrap();
        frozen.set(1).unwrap();
        keyed.set(1).unwrap();
    }
    assert!(store.contains("frozen"));
    assert!(!store.contains("keyed"));
}
