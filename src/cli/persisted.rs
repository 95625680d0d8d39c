use std::io::Write;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::persist::{Fallback, KeyedPersistedValue, PersistedValue};
use crate::storage::FileStore;

/// Store key of the greeting name.
pub const NAME_KEY: &str = "name";

/// Persisted counter object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CountState {
    pub count: i64,
}

fn open_store(config: &Config) -> anyhow::Result<FileStore> {
    FileStore::open(&config.storage.path)
        .with_context(|| format!("opening store {}", config.storage.path.display()))
}

pub(super) fn greet<W: Write>(
    config: &Config,
    name: Option<String>,
    out: &mut W,
) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let mut persisted = PersistedValue::initialize(store, NAME_KEY, Fallback::value(String::new()))?;

    if let Some(name) = name {
        persisted.set(name)?;
    }

    let name = persisted.get();
    if name.is_empty() {
        writeln!(out, "Please type your name")?;
    } else {
        writeln!(out, "Hello {}", name)?;
    }
    Ok(())
}

pub(super) fn counter<W: Write>(
    config: &Config,
    key: &str,
    by: i64,
    out: &mut W,
) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let mut persisted = PersistedValue::initialize(store, key, Fallback::with(CountState::default))?;

    persisted.update(move |state| CountState {
        count: state.count + by,
    })?;

    writeln!(out, "value: {}", serde_json::to_string_pretty(persisted.get())?)?;
    Ok(())
}

pub(super) fn scratch<W: Write>(
    config: &Config,
    key: &str,
    raw: &str,
    move_to: Option<String>,
    out: &mut W,
) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

    {
        let mut scratch = KeyedPersistedValue::initialize(&store, key, Fallback::value(Value::Null))?;
        scratch.set(value)?;
        print_store(&store, "written", out)?;

        if let Some(next) = move_to {
            scratch.set_key(next)?;
            print_store(&store, "moved", out)?;
        }
    }

    print_store(&store, "released", out)
}

fn print_store<W: Write>(store: &FileStore, step: &str, out: &mut W) -> anyhow::Result<()> {
    let entries = store.snapshot()?;
    writeln!(out, "{}: {}", step, serde_json::to_string(&entries)?)?;
    Ok(())
}
