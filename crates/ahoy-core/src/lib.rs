//! # ahoy-core
//!
//! Foundation crate for the Ahoy tracking client.
//! Defines the visit/event model, collaborator traits, errors, config, and
//! constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use crate::config::{AhoyConfig, ApplicationEnvironment};
pub use crate::errors::{AhoyError, AhoyResult};
pub use crate::models::{Event, Properties, ScalarValue, TokenPair, Visit};
pub use crate::traits::{
    Clock, DeviceIdProvider, Headers, HttpRequest, HttpResponse, IdGenerator, KeyValueStore,
    TokenStore, Transport,
};
