//! Top-level client configuration with layered resolution.

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{defaults, ApplicationEnvironment, HttpConfig, RetryConfig, StorageConfig};
use crate::errors::ConfigError;

/// Client configuration.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`AHOY_*`)
/// 2. Config file (TOML)
/// 3. Compiled defaults
///
/// Transport, interceptors, and the token store are runtime objects and are
/// set on the client builder, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AhoyConfig {
    /// Collector base URL, e.g. `https://example.com`.
    pub base_url: String,
    pub ahoy_path: String,
    pub events_path: String,
    pub visits_path: String,
    /// Visit token lifetime. `None` means the 30 minute default.
    pub visit_duration_secs: Option<u64>,
    /// Namespace mixed into the derived device id.
    pub device_id_namespace: String,
    pub environment: ApplicationEnvironment,
    pub retry: RetryConfig,
    pub http: HttpConfig,
    pub storage: StorageConfig,
}

impl Default for AhoyConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            ahoy_path: defaults::DEFAULT_AHOY_PATH.to_string(),
            events_path: defaults::DEFAULT_EVENTS_PATH.to_string(),
            visits_path: defaults::DEFAULT_VISITS_PATH.to_string(),
            visit_duration_secs: None,
            device_id_namespace: defaults::DEFAULT_DEVICE_ID_NAMESPACE.to_string(),
            environment: ApplicationEnvironment::default(),
            retry: RetryConfig::default(),
            http: HttpConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl AhoyConfig {
    pub fn new(base_url: impl Into<String>, environment: ApplicationEnvironment) -> Self {
        Self {
            base_url: base_url.into(),
            environment,
            ..Self::default()
        }
    }

    /// Effective visit token lifetime.
    pub fn visit_duration(&self) -> Duration {
        let secs = self
            .visit_duration_secs
            .unwrap_or(defaults::DEFAULT_VISIT_DURATION_SECS);
        // chrono panics above i64::MAX milliseconds.
        Duration::seconds(secs.min(i64::MAX as u64 / 1_000) as i64)
    }

    /// Load configuration: defaults, then `path` if given, then `AHOY_*` env vars.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };

        config.apply_env_overrides_from(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file. Unknown keys are ignored (forward-compatible).
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply overrides from a variable lookup.
    /// Pattern: `AHOY_BASE_URL`, `AHOY_VISIT_DURATION_SECS`, etc.
    /// Unparseable numeric values are ignored with a warning.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("AHOY_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = lookup("AHOY_PATH") {
            self.ahoy_path = v;
        }
        if let Some(v) = lookup("AHOY_EVENTS_PATH") {
            self.events_path = v;
        }
        if let Some(v) = lookup("AHOY_VISITS_PATH") {
            self.visits_path = v;
        }
        if let Some(v) = lookup("AHOY_VISIT_DURATION_SECS") {
            match v.parse::<u64>() {
                Ok(secs) => self.visit_duration_secs = Some(secs),
                Err(_) => tracing::warn!(value = %v, "ignoring invalid AHOY_VISIT_DURATION_SECS"),
            }
        }
        if let Some(v) = lookup("AHOY_PLATFORM") {
            self.environment.platform = v;
        }
        if let Some(v) = lookup("AHOY_APP_VERSION") {
            self.environment.app_version = v;
        }
        if let Some(v) = lookup("AHOY_OS_VERSION") {
            self.environment.os_version = v;
        }
        if let Some(v) = lookup("AHOY_MAX_RETRIES") {
            match v.parse::<u32>() {
                Ok(n) => self.retry.max_retries = n,
                Err(_) => tracing::warn!(value = %v, "ignoring invalid AHOY_MAX_RETRIES"),
            }
        }
        if let Some(v) = lookup("AHOY_HTTP_TIMEOUT_SECS") {
            match v.parse::<u64>() {
                Ok(secs) => self.http.timeout_secs = secs,
                Err(_) => tracing::warn!(value = %v, "ignoring invalid AHOY_HTTP_TIMEOUT_SECS"),
            }
        }
        if let Some(v) = lookup("AHOY_STORAGE_PATH") {
            self.storage.path = Some(v);
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "base_url".to_string(),
                message: "must be set".to_string(),
            });
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed {
                field: "base_url".to_string(),
                message: "must start with http:// or https://".to_string(),
            });
        }
        for (field, value) in [
            ("ahoy_path", &self.ahoy_path),
            ("events_path", &self.events_path),
            ("visits_path", &self.visits_path),
        ] {
            if value.trim_matches('/').is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if self.visit_duration_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "visit_duration_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "http.timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.retry.initial_backoff_ms > self.retry.max_backoff_ms {
            return Err(ConfigError::ValidationFailed {
                field: "retry.initial_backoff_ms".to_string(),
                message: "must not exceed retry.max_backoff_ms".to_string(),
            });
        }
        Ok(())
    }
}
