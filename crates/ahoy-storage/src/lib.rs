//! # ahoy-storage
//!
//! Backends for the [`KeyValueStore`](ahoy_core::KeyValueStore) seam that
//! holds the persisted token slots.
//!
//! - `memory`: `MemoryStore`, process-local, backed by `DashMap`
//! - `sqlite`: `SqliteStore`, a single-table SQLite database

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use ahoy_core::errors::StorageError;

/// Convert a backend error message into a `StorageError`.
pub(crate) fn to_storage_err(message: String) -> StorageError {
    StorageError::SqliteError { message }
}
