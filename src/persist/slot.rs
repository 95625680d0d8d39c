use tracing::{debug, warn};

use super::codec::Codec;
use super::error::PersistError;
use super::fallback::Fallback;
use super::update::Update;
use crate::storage::KeyValueStore;

/// Shared core of both persisted-value variants: an in-memory value plus the
/// store and codec it is mirrored through.
pub(crate) struct Slot<V, S, C> {
    pub(crate) key: String,
    pub(crate) value: V,
    pub(crate) store: S,
    pub(crate) codec: C,
}

impl<V, S, C> Slot<V, S, C>
where
    S: KeyValueStore,
    C: Codec<V>,
{
    /// Load the stored value for `key`, falling back when it is absent or
    /// cannot be decoded. An undecodable entry is removed.
    pub(crate) fn load(
        store: S,
        codec: C,
        key: String,
        fallback: Fallback<V>,
    ) -> Result<Self, PersistError> {
        let raw = store.get(&key).map_err(|e| PersistError::store(&key, e))?;

        let stored = match raw {
            Some(raw) => match codec.decode(&raw) {
                Ok(value) => {
                    debug!(key = %key, "loaded persisted value");
                    Some(value)
                }
                Err(err) => {
                    warn!(key = %key, error = %err, "discarding unreadable persisted value");
                    store.remove(&key).map_err(|e| PersistError::store(&key, e))?;
                    None
                }
            },
            None => {
                debug!(key = %key, "no persisted value");
                None
            }
        };

        let value = match stored {
            Some(value) => value,
            None => fallback.resolve(),
        };

        Ok(Self {
            key,
            value,
            store,
            codec,
        })
    }

    pub(crate) fn write(&self, key: &str, value: &V) -> Result<(), PersistError> {
        let raw = self
            .codec
            .encode(value)
            .map_err(|e| PersistError::encode(key, e))?;
        self.store
            .set(key, &raw)
            .map_err(|e| PersistError::store(key, e))
    }

    /// Apply updates in order, each seeing the result of the previous one,
    /// then persist the final value once. Nothing changes if the write fails.
    pub(crate) fn apply<I>(&mut self, updates: I) -> Result<(), PersistError>
    where
        I: IntoIterator<Item = Update<V>>,
    {
        let mut updates = updates.into_iter();
        let Some(first) = updates.next() else {
            return Ok(());
        };

        let mut next = first.run(&self.value);
        for update in updates {
            next = update.run(&next);
        }

        self.write(&self.key, &next)?;
        self.value = next;
        Ok(())
    }
}
