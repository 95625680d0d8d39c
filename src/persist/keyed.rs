use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::codec::{Codec, JsonCodec};
use super::error::PersistError;
use super::fallback::Fallback;
use super::slot::Slot;
use super::update::Update;
use crate::storage::KeyValueStore;

/// A persisted value whose key may change over its lifetime.
///
/// Moving to a new key deletes the entry under the old key before writing
/// the current value under the new one. Dropping the handle deletes the
/// entry under the current key, so nothing is left behind once the owner is
/// gone. Use [`PersistedValue`](super::PersistedValue) when the value must
/// outlive its handle.
pub struct KeyedPersistedValue<V, S: KeyValueStore, C = JsonCodec<V>> {
    slot: Slot<V, S, C>,
}

impl<V, S> KeyedPersistedValue<V, S, JsonCodec<V>>
where
    V: Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    /// Load `key` from `store` as JSON, or fall back. As with
    /// [`PersistedValue::initialize`](super::PersistedValue::initialize), the
    /// store stays without an entry until the first change.
    pub fn initialize(
        store: S,
        key: impl Into<String>,
        fallback: Fallback<V>,
    ) -> Result<Self, PersistError> {
        Self::with_codec(store, key, fallback, JsonCodec::new())
    }
}

impl<V, S, C> KeyedPersistedValue<V, S, C>
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

    pub fn set(&mut self, value: V) -> Result<(), PersistError> {
        self.set_value(Update::Replace(value))
    }

    pub fn update<F>(&mut self, f: F) -> Result<(), PersistError>
    where
        F: FnOnce(&V) -> V + Send + 'static,
    {
        self.set_value(Update::apply(f))
    }

    pub fn set_value(&mut self, update: Update<V>) -> Result<(), PersistError> {
        self.slot.apply([update])
    }

    pub fn batch<I>(&mut self, updates: I) -> Result<(), PersistError>
    where
        I: IntoIterator<Item = Update<V>>,
    {
        self.slot.apply(updates)
    }

    /// Move the value to `key`.
    ///
    /// The in-memory value is kept as is; nothing is read from the new key.
    /// Setting the current key again is a no-op.
    pub fn set_key(&mut self, key: impl Into<String>) -> Result<(), PersistError> {
        let key = key.into();
        if key == self.slot.key {
            return Ok(());
        }

        debug!(from = %self.slot.key, to = %key, "moving persisted value");
        self.slot
            .store
            .remove(&self.slot.key)
            .map_err(|e| PersistError::store(&self.slot.key, e))?;
        self.slot.key = key;
        self.slot.write(&self.slot.key, &self.slot.value)
    }
}

impl<V, S: KeyValueStore, C> Drop for KeyedPersistedValue<V, S, C> {
    fn drop(&mut self) {
        if let Err(err) = self.slot.store.remove(&self.slot.key) {
            warn!(key = %self.slot.key, error = %err, "failed to remove persisted value on drop");
        }
    }
}

impl<V: std::fmt::Debug, S: KeyValueStore, C> std::fmt::Debug for KeyedPersistedValue<V, S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedPersistedValue")
            .field("key", &self.slot.key)
            .field("value", &self.slot.value)
            .finish()
    }
}
