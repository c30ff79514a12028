//! Key-value storage port

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage rejected write to {key}: {message}")]
    WriteRejected { key: String, message: String },
}

/// String-valued key-value storage (sessionStorage, localStorage, memory)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process store used by native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store that rejects reads and/or writes, wrapping seeded contents
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FailingStore {
    pub inner: MemoryStore,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

#[cfg(test)]
impl FailingStore {
    pub fn failing_all(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_reads: true,
            fail_writes: true,
        }
    }

    pub fn failing_writes(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_reads: false,
            fail_writes: true,
        }
    }
}

#[cfg(test)]
impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable(format!("read of {}", key)));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::WriteRejected {
                key: key.to_string(),
                message: "quota exceeded".to_string(),
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::WriteRejected {
                key: key.to_string(),
                message: "quota exceeded".to_string(),
            });
        }
        self.inner.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "1").unwrap();
        store.set("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_failing_store_reports_errors() {
        let mut seeded = MemoryStore::new();
        seeded.set("k", "v").unwrap();

        let mut store = FailingStore::failing_writes(seeded.clone());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert!(matches!(store.set("k", "w"), Err(StoreError::WriteRejected { .. })));
        assert!(matches!(store.remove("k"), Err(StoreError::WriteRejected { .. })));

        let store = FailingStore::failing_all(seeded);
        assert!(matches!(store.get("k"), Err(StoreError::Unavailable(_))));
    }
}
