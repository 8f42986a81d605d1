/// Persistence errors from a key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("failed to encode slot {key}: {reason}")]
    EncodingFailed { key: String, reason: String },

    #[error("storage backend unavailable: {reason}")]
    Unavailable { reason: String },
}
