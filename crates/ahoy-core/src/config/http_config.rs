use serde::{Deserialize, Serialize};

use super::defaults;

/// HTTP transport configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Accept gzip-compressed responses.
    pub gzip: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::DEFAULT_HTTP_TIMEOUT_SECS,
            gzip: defaults::DEFAULT_HTTP_GZIP,
        }
    }
}
