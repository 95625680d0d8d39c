use serde::de::DeserializeOwned;
use serde::Serialize;

use super::codec::{Codec, JsonCodec};
use super::error::PersistError;
use super::fallback::Fallback;
use super::slot::Slot;
use super::update::Update;
use crate::storage::KeyValueStore;

/// A value mirrored into a durable store under a key fixed at
/// initialization.
///
/// Every change is written synchronously. The entry is never deleted, so the
/// value survives this handle and is picked up by the next one created for
/// the same key.
pub struct PersistedValue<V, S, C = JsonCodec<V>> {
    slot: Slot<V, S, C>,
}

impl<V, S> PersistedValue<V, S, JsonCodec<V>>
where
    V: Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    /// Load `key` from `store` as JSON, or fall back.
    ///
    /// Nothing is written here: when the fallback is used, the store holds no
    /// entry for `key` until the first change. An undecodable entry is
    /// removed, so it also stays absent until then.
    pub fn initialize(
        store: S,
        key: impl Into<String>,
        fallback: Fallback<V>,
    ) -> Result<Self, PersistError> {
        Self::with_codec(store, key, fallback, JsonCodec::new())
    }
}

impl<V, S, C> PersistedValue<V, S, C>
where
    S: KeyValueStore,
    C: Codec<V>,
{
    pub fn with_codec(
        store: S,
        key: impl Into<String>,
        fallback: Fallback<V>,
        codec: C,
    ) -> Result<Self, PersistError> {
        let slot = Slot::load(store, codec, key.into(), fallback)?;
        Ok(Self { slot })
    }

    pub fn get(&self) -> &V {
        &self.slot.value
    }

    pub fn key(&self) -> &str {
        &self.slot.key
    }

    /// Replace the value and persist it.
    pub fn set(&mut self, value: V) -> Result<(), PersistError> {
        self.set_value(Update::Replace(value))
    }

    /// Derive the next value from the current one and persist it.
    pub fn update<F>(&mut self, f: F) -> Result<(), PersistError>
    where
        F: FnOnce(&V) -> V + Send + 'static,
    {
        self.set_value(Update::apply(f))
    }

    pub fn set_value(&mut self, update: Update<V>) -> Result<(), PersistError> {
        self.slot.apply([update])
    }

    /// Apply several updates against the latest value and persist once.
    pub fn batch<I>(&mut self, updates: I) -> Result<(), PersistError>
    where
        I: IntoIterator<Item = Update<V>>,
    {
        self.slot.apply(updates)
    }
}

impl<V: std::fmt::Debug, S, C> std::fmt::Debug for PersistedValue<V, S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistedValue")
            .field("key", &self.slot.key)
            .field("value", &self.slot.value)
            .finish()
    }
}
