//! SQLite-backed slot store. One connection behind a mutex; every write is a
//! single upsert, so no transactions are needed.

pub mod pragmas;

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use ahoy_core::errors::StorageError;
use ahoy_core::KeyValueStore;

use crate::to_storage_err;
use pragmas::apply_pragmas;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS ahoy_kv (
    key        TEXT PRIMARY KEY NOT NULL,
    value      BLOB NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
";

/// Persistent key-value store in a single SQLite table.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Self::init(conn)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::debug!("sqlite slot store ready");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Number of stored slots.
    pub fn len(&self) -> Result<usize, StorageError> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM ahoy_kv", [], |row| row.get(0))
            .map_err(|e| to_storage_err(e.to_string()))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Run a closure against the underlying connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.conn.lock();
        f(&guard)
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT value FROM ahoy_kv WHERE key = ?1",
            params![key],
            |row| row.get::<_, Vec<u8>>(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO ahoy_kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
            params![key, value],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock();
        conn.execute("DELETE FROM ahoy_kv WHERE key = ?1", params![key])
            .map_err(|e| to_storage_err(e.to_string()))?;
        Ok(())
    }
}
