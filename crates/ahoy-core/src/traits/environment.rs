//! Ambient providers injected through the tracking context.

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of fresh, globally unique identifiers.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Stable per-installation device identifier, if the platform exposes one.
pub trait DeviceIdProvider: Send + Sync {
    fn device_id(&self) -> Option<String>;
}
