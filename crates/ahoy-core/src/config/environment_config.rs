use serde::{Deserialize, Serialize};

use super::defaults;

/// Describes the running application; sent with every visit confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationEnvironment {
    pub platform: String,
    pub app_version: String,
    pub os_version: String,
}

impl ApplicationEnvironment {
    pub fn new(
        platform: impl Into<String>,
        app_version: impl Into<String>,
        os_version: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            app_version: app_version.into(),
            os_version: os_version.into(),
        }
    }
}

impl Default for ApplicationEnvironment {
    fn default() -> Self {
        Self {
            platform: std::env::consts::OS.to_string(),
            app_version: defaults::DEFAULT_APP_VERSION.to_string(),
            os_version: defaults::DEFAULT_OS_VERSION.to_string(),
        }
    }
}
