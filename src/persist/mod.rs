//! Values kept in sync with a durable key-value store.
//!
//! A persisted value is loaded once when created: a stored entry that
//! decodes wins, otherwise the [`Fallback`] provides the value. An entry
//! that fails to decode is deleted and treated as absent. Afterwards every
//! change is encoded and written synchronously before it becomes visible.
//!
//! Two variants exist with opposite cleanup policies:
//!
//! - [`PersistedValue`] freezes its key and never deletes.
//! - [`KeyedPersistedValue`] allows the key to change and removes stale
//!   entries, including its own entry when dropped.

mod codec;
mod error;
mod fallback;
mod keyed;
mod slot;
mod update;
mod value;

pub use codec::{Codec, CodecError, JsonCodec};
pub use error::PersistError;
pub use fallback::Fallback;
pub use keyed::KeyedPersistedValue;
pub use update::Update;
pub use value::PersistedValue;
