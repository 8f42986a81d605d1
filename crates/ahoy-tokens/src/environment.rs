//! Default providers: system clock, uuid v4 ids, and a machine-id based
//! device identifier.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use ahoy_core::{Clock, DeviceIdProvider, IdGenerator};

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Random (v4) UUIDs in hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Locations of the OS machine id, in lookup order.
pub const MACHINE_ID_PATHS: [&str; 2] = ["/etc/machine-id", "/var/lib/dbus/machine-id"];

const DERIVE_KEY_CONTEXT: &str = "ahoy-rs 2024 visitor token from machine id";

/// Derives a stable, UUID-shaped device id from the OS machine id.
///
/// The raw machine id is never sent: it is hashed together with a namespace,
/// so two applications on one host see unrelated ids. Returns `None` where
/// no machine id exists (the visitor slot then falls back to a random id).
#[derive(Debug, Clone)]
pub struct MachineIdProvider {
    namespace: String,
    sources: Vec<PathBuf>,
}

impl MachineIdProvider {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self::with_sources(namespace, MACHINE_ID_PATHS.iter().map(PathBuf::from).collect())
    }

    pub fn with_sources(namespace: impl Into<String>, sources: Vec<PathBuf>) -> Self {
        Self {
            namespace: namespace.into(),
            sources,
        }
    }

    fn read_machine_id(&self) -> Option<String> {
        self.sources.iter().find_map(|path| {
            let raw = std::fs::read_to_string(path).ok()?;
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
    }
}

impl DeviceIdProvider for MachineIdProvider {
    fn device_id(&self) -> Option<String> {
        let machine_id = self.read_machine_id()?;

        let mut hasher = blake3::Hasher::new_derive_key(DERIVE_KEY_CONTEXT);
        hasher.update(self.namespace.as_bytes());
        hasher.update(&[0]);
        hasher.update(machine_id.as_bytes());
        let digest = hasher.finalize();

        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest.as_bytes()[..16]);
        Some(uuid::Builder::from_random_bytes(bytes).into_uuid().to_string())
    }
}
