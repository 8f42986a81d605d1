use crate::errors::StorageError;

/// Raw key-value persistence. Values are opaque bytes (JSON envelopes in practice).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
