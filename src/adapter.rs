//! Storage adapters: one `get`/`set`/`remove` contract over three backends.
//!
//! An adapter is bound to a single [`Backend`] when it is created and stays bound to it.
//! Values are [`serde_json::Value`]s and are stored as JSON text. For typed access use
//! `get_as` and `set_as` on `dyn StorageAdapter`.
//!
//! # Return values
//!
//! - `set` never fails loudly. If the substrate refuses the write it reports through the
//!   diagnostic sink and returns [`WriteOutcome::Rejected`].
//! - `get` returns `Ok(None)` for a missing key and `Err(StorageError::Decode)` when the stored
//!   text is not JSON. That is the only error that reaches the caller.
//! - `remove` always returns `true`.
//!
//! The area adapters ([`AreaAdapter`]) ignore the expiry passed to
//! [`StorageAdapter::set_with_expiry`]; only cookies expire.

mod area;
mod codec;
mod cookie;

pub use area::AreaAdapter;
pub use cookie::CookieAdapter;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::StorageError;
use crate::storage::Backend;

/// Result of a `set`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The value was written.
    ///
    /// Area adapters carry the text read back from their substrate after the write; the cookie
    /// adapter carries the encoded value it wrote.
    Stored(Option<String>),
    /// The substrate refused the write (or the size guard did, when enforcing).
    Rejected,
}

impl WriteOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, WriteOutcome::Stored(_))
    }

    pub fn stored_text(&self) -> Option<&str> {
        match self {
            WriteOutcome::Stored(text) => text.as_deref(),
            WriteOutcome::Rejected => None,
        }
    }
}

pub trait StorageAdapter: Send + Sync {
    /// The backend this adapter is bound to.
    fn backend(&self) -> Backend;

    /// Stored text for `key`, without decoding.
    fn get_raw(&self, key: &str) -> Option<String>;

    /// Decoded value for `key`.
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        self.get_raw(key)
            .map(|raw| codec::decode(key, &raw))
            .transpose()
    }

    /// Writes `value` under `key`. `expiry_days` only applies to cookies.
    fn set_with_expiry(&self, key: &str, value: &Value, expiry_days: Option<u32>) -> WriteOutcome;

    /// Writes `value` under `key` without expiry.
    fn set(&self, key: &str, value: &Value) -> WriteOutcome {
        self.set_with_expiry(key, value, None)
    }

    /// Deletes `key`. Always returns `true`, whether or not the key existed.
    fn remove(&self, key: &str) -> bool;
}

impl dyn StorageAdapter {
    /// Reads `key` and deserializes it into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get(key)? {
            None => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| StorageError::Decode { key: key.to_string(), source }),
        }
    }

    /// Serializes `value` and writes it under `key`.
    pub fn set_as<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<WriteOutcome, StorageError> {
        let value = serde_json::to_value(value)?;
        Ok(self.set(key, &value))
    }
}
