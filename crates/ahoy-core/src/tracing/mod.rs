//! Observability for the Ahoy client.
//! `tracing` crate with `EnvFilter`, plus structured event helpers.

pub mod events;
pub mod setup;

pub use setup::{init_tracing, init_tracing_with_filter};
