//! Browser LocalStorage backend (WASM only)

use web_sys::Storage;

use super::KeyValueStore;
use crate::error::StoreError;

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open the window's LocalStorage, if the browser allows it
    pub fn open() -> Result<Self, StoreError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::WriteFailed {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::WriteFailed {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}
