//! Value <-> string conversion for persisted values.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode stored value: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Serializes values of type `V` to the raw strings kept in a store.
pub trait Codec<V> {
    fn encode(&self, value: &V) -> Result<String, CodecError>;
    fn decode(&self, raw: &str) -> Result<V, CodecError>;
}

/// JSON codec backed by serde.
pub struct JsonCodec<V> {
    _value: PhantomData<fn() -> V>,
}

impl<V> JsonCodec<V> {
    pub fn new() -> Self {
        Self {
            _value: PhantomData,
        }
    }
}

impl<V> Default for JsonCodec<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for JsonCodec<V> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for JsonCodec<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("JsonCodec")
    }
}

impl<V: Serialize + DeserializeOwned> Codec<V> for JsonCodec<V> {
    fn encode(&self, value: &V) -> Result<String, CodecError> {
        serde_json::to_string(value).map_err(CodecError::Encode)
    }

    fn decode(&self, raw: &str) -> Result<V, CodecError> {
        serde_json::from_str(raw).map_err(CodecError::Decode)
    }
}
