//! MemoryStore: concurrent in-process slots via DashMap.

use std::sync::Arc;

use dashmap::DashMap;

use ahoy_core::errors::StorageError;
use ahoy_core::KeyValueStore;

/// Thread-safe in-memory key-value store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<DashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop every slot.
    pub fn clear(&self) {
        self.slots.clear();
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.slots.get(key).map(|r| r.value().clone()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.slots.remove(key);
        Ok(())
    }
}
