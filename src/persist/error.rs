use thiserror::Error;

use super::codec::CodecError;
use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Store error for key '{key}': {source}")]
    Store {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("Failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: CodecError,
    },
}

impl PersistError {
    pub(crate) fn store(key: &str, source: StoreError) -> Self {
        Self::Store {
            key: key.to_string(),
            source,
        }
    }

    pub(crate) fn encode(key: &str, source: CodecError) -> Self {
        Self::Encode {
            key: key.to_string(),
            source,
        }
    }
}
