//! # ahoy-tokens
//!
//! Token lifecycle for the Ahoy client: a long-lived visitor token and a
//! short-lived visit token, each held in an expiring persisted slot.
//!
//! ## Modules
//!
//! - `slot`: `ExpiringSlot`, get-or-create-on-expiry over a key-value store
//! - `manager`: `TokenManager`, the default `TokenStore`
//! - `environment`: system clock, uuid generator, machine-id device provider
//! - `context`: `TrackingContext` bundling the injected providers

pub mod context;
pub mod environment;
pub mod manager;
pub mod slot;

pub use context::TrackingContext;
pub use environment::{MachineIdProvider, SystemClock, UuidGenerator};
pub use manager::TokenManager;
pub use slot::{ExpiringSlot, SlotEnvelope};
