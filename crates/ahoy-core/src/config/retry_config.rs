use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Retry policy for fire-and-forget event tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Additional attempts after the first failure.
    pub max_retries: u32,
    /// Initial backoff (doubles each retry).
    pub initial_backoff_ms: u64,
    /// Backoff ceiling.
    pub max_backoff_ms: u64,
}

impl RetryConfig {
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: defaults::DEFAULT_MAX_RETRIES,
            initial_backoff_ms: defaults::DEFAULT_INITIAL_BACKOFF_MS,
            max_backoff_ms: defaults::DEFAULT_MAX_BACKOFF_MS,
        }
    }
}
