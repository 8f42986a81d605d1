//! Expiring persisted value: a named slot holding `{ value, expiry }`.
//!
//! There is no refresh API. A read returns the stored value while it is
//! valid and transparently replaces it once it has expired.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use ahoy_core::errors::StorageError;
use ahoy_core::tracing::events;
use ahoy_core::{Clock, KeyValueStore};

/// Stored form of a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEnvelope {
    pub value: String,
    /// `None` never expires.
    pub expiry: Option<DateTime<Utc>>,
}

impl SlotEnvelope {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry.is_some_and(|expiry| now > expiry)
    }
}

type Generator = Box<dyn Fn() -> String + Send + Sync>;

/// A single expiring slot in a key-value store.
///
/// Concurrent first reads of an empty or expired slot are not coordinated:
/// both may generate a value and the last write wins.
pub struct ExpiringSlot {
    key: String,
    lifetime: Option<Duration>,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    generator: Generator,
}

impl ExpiringSlot {
    pub fn new<G>(
        key: impl Into<String>,
        lifetime: Option<Duration>,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        generator: G,
    ) -> Self
    where
        G: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            lifetime,
            store,
            clock,
            generator: Box::new(generator),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn lifetime(&self) -> Option<Duration> {
        self.lifetime
    }

    /// Return the stored value, or generate and persist a new one if the slot
    /// is empty, unreadable, or expired.
    ///
    /// The expiry is fixed when a value is issued, so changing the lifetime
    /// only affects values issued afterwards.
    pub fn get_or_create(&self) -> Result<String, StorageError> {
        let now = self.clock.now();

        if let Some(envelope) = self.peek()? {
            if !envelope.is_expired(now) {
                return Ok(envelope.value);
            }
            tracing::debug!(slot = %self.key, "slot expired, issuing a new value");
        }

        let envelope = SlotEnvelope {
            value: (self.generator)(),
            // Overflowing the calendar means the value simply never expires.
            expiry: self.lifetime.and_then(|d| now.checked_add_signed(d)),
        };
        let bytes = serde_json::to_vec(&envelope).map_err(|e| StorageError::EncodingFailed {
            key: self.key.clone(),
            reason: e.to_string(),
        })?;
        self.store.set(&self.key, &bytes)?;
        events::token_issued(&self.key, envelope.expiry.is_some());

        Ok(envelope.value)
    }

    /// Read the stored envelope without creating one. Undecodable bytes read
    /// as empty so the next `get_or_create` overwrites them.
    pub fn peek(&self) -> Result<Option<SlotEnvelope>, StorageError> {
        let Some(bytes) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        match serde_json::from_slice::<SlotEnvelope>(&bytes) {
            Ok(envelope) => Ok(Some(envelope)),
            Err(e) => {
                tracing::warn!(slot = %self.key, error = %e, "discarding unreadable token slot");
                Ok(None)
            }
        }
    }

    /// Remove the slot; the next read issues a new value.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(&self.key)
    }
}

impl fmt::Debug for ExpiringSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpiringSlot")
            .field("key", &self.key)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}
