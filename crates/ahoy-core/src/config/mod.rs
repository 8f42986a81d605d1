//! Configuration for the Ahoy client.
//! TOML-based, 3-layer resolution: env > file > defaults.

pub mod ahoy_config;
pub mod defaults;
pub mod environment_config;
pub mod http_config;
pub mod retry_config;
pub mod storage_config;

pub use ahoy_config::AhoyConfig;
pub use environment_config::ApplicationEnvironment;
pub use http_config::HttpConfig;
pub use retry_config::RetryConfig;
pub use storage_config::StorageConfig;
