//! Web Storage backend
//!
//! `sessionStorage` backs the session scope, `localStorage` the durable one.

use web_sys::Storage;

use crate::persistence::{KeyValueStore, StoreError};

pub struct WebStorage {
    storage: Storage,
}

impl WebStorage {
    /// The tab's `sessionStorage`
    pub fn session() -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
        let storage = window
            .session_storage()
            .map_err(|e| StoreError::Unavailable(format!("sessionStorage: {:?}", e)))?
            .ok_or_else(|| StoreError::Unavailable("sessionStorage missing".into()))?;
        Ok(Self { storage })
    }

    /// The origin's `localStorage`
    pub fn local() -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("localStorage: {:?}", e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage missing".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // Fails when the quota is exceeded or storage is disabled
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::WriteRejected {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::WriteRejected {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
    }
}
