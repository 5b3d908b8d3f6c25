//! Key/value string persistence
//!
//! Features:
//! - One string value per key, LocalStorage style
//! - JSON helpers that treat malformed data as missing
//! - In-memory backend for native builds and tests

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

#[cfg(target_arch = "wasm32")]
mod local_storage;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;

/// String storage keyed by name
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Volatile storage, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Read and decode a JSON value. Missing or malformed data yields `None`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let json = store.get(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed data under `{}`: {}", key, e);
            None
        }
    }
}

/// Encode a value as JSON and store it
pub fn save_json<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a"), None);
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").as_deref(), Some("1"));
        store.remove("a").unwrap();
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn test_load_json_malformed_is_none() {
        let mut store = MemoryStore::new();
        store.set("k", "{not json").unwrap();
        assert_eq!(load_json::<Vec<u32>>(&store, "k"), None);
        assert_eq!(load_json::<Vec<u32>>(&store, "missing"), None);
    }

    #[test]
    fn test_save_then_load_json() {
        let mut store = MemoryStore::new();
        save_json(&mut store, "k", &vec![3u32, 1]).unwrap();
        assert_eq!(store.get("k").as_deref(), Some("[3,1]"));
        assert_eq!(load_json::<Vec<u32>>(&store, "k"), Some(vec![3, 1]));
    }

    #[test]
    fn test_serialization_error_names_cause() {
        let err: StoreError = serde_json::from_str::<Vec<u32>>("{").unwrap_err().into();
        let msg = err.to_string();
        assert!(msg.starts_with("Serialization error: "));
        assert!(msg.len() > "Serialization error: ".len());
    }
}
