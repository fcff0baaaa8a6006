//! Key-value persistence
//!
//! Features:
//! - String key-value stores (LocalStorage on web, a JSON file natively, memory for tests)
//! - JSON-encoded scalar values
//! - Hydration tracking with default fallback

mod memory;
mod persistent;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStore;
pub use persistent::Persistent;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failures surfaced by a [`KeyValueStore`] or by value encoding
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store does not exist in this environment
    #[error("storage unavailable")]
    Unavailable,
    #[error("failed to read key {key:?}: {detail}")]
    Read { key: String, detail: String },
    #[error("failed to decode key {key:?}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode key {key:?}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write key {key:?}: {detail}")]
    Write { key: String, detail: String },
}

/// A string-to-string store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON value. `Ok(None)` when the key is absent.
pub fn read_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Decode {
            key: key.to_string(),
            source,
        })
}

/// Encode and write a JSON value
pub fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let mut store = MemoryStore::new();
        write_json(&mut store, "k", &1.5f32).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("1.5"));
        assert_eq!(read_json::<f32, _>(&store, "k").unwrap(), Some(1.5));
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(read_json::<f32, _>(&store, "missing").unwrap(), None);
    }

    #[test]
    fn test_corrupt_value_is_decode_error() {
        let mut store = MemoryStore::new();
        store.set("k", "{not json").unwrap();
        let err = read_json::<f32, _>(&store, "k").unwrap_err();
        assert!(matches!(err, StorageError::Decode { ref key, .. } if key == "k"));
    }
}
