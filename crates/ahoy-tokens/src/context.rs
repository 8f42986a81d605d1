//! Explicit tracking context: every ambient dependency of the token store
//! and the client, injected at construction.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use ahoy_core::{AhoyConfig, AhoyResult, Clock, DeviceIdProvider, IdGenerator, KeyValueStore};
use ahoy_storage::{MemoryStore, SqliteStore};

use crate::environment::{MachineIdProvider, SystemClock, UuidGenerator};

#[derive(Clone)]
pub struct TrackingContext {
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn IdGenerator>,
    pub device_id: Arc<dyn DeviceIdProvider>,
    pub store: Arc<dyn KeyValueStore>,
}

impl TrackingContext {
    pub fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        device_id: Arc<dyn DeviceIdProvider>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            clock,
            ids,
            device_id,
            store,
        }
    }

    /// System providers over the given store.
    pub fn system(store: Arc<dyn KeyValueStore>, device_id_namespace: &str) -> Self {
        Self::new(
            Arc::new(SystemClock),
            Arc::new(UuidGenerator),
            Arc::new(MachineIdProvider::new(device_id_namespace)),
            store,
        )
    }

    /// System providers over a process-local store.
    pub fn in_memory(device_id_namespace: &str) -> Self {
        Self::system(Arc::new(MemoryStore::new()), device_id_namespace)
    }

    /// System providers over the store named by `config.storage`: SQLite when
    /// a path is configured, memory otherwise.
    pub fn from_config(config: &AhoyConfig) -> AhoyResult<Self> {
        let store: Arc<dyn KeyValueStore> = match config.storage.path.as_deref() {
            Some(path) => Arc::new(SqliteStore::open(Path::new(path))?),
            None => Arc::new(MemoryStore::new()),
        };
        Ok(Self::system(store, &config.device_id_namespace))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_device_id(mut self, device_id: Arc<dyn DeviceIdProvider>) -> Self {
        self.device_id = device_id;
        self
    }

    pub fn with_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = store;
        self
    }
}

impl fmt::Debug for TrackingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackingContext").finish_non_exhaustive()
    }
}
