use serde::{Deserialize, Serialize};

/// Token persistence configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file for token slots. `None` keeps tokens in memory,
    /// which means a new visitor per process.
    pub path: Option<String>,
}
