//! # ahoy-client
//!
//! Client for an Ahoy analytics collector. Confirms visits, submits events
//! against the confirmed visit, and exposes the current visit to the
//! application.
//!
//! ```no_run
//! # async fn run() -> ahoy_core::AhoyResult<()> {
//! use ahoy_client::Ahoy;
//! use ahoy_core::{AhoyConfig, ApplicationEnvironment, Properties};
//!
//! let config = AhoyConfig::new(
//!     "https://example.com",
//!     ApplicationEnvironment::new("linux", "1.0.0", "6.1"),
//! );
//! let ahoy = Ahoy::new(config)?;
//! ahoy.track_visit(None).await?;
//! ahoy.track_event("opened", Properties::new());
//! # Ok(())
//! # }
//! ```

pub mod encoding;
pub mod engine;
pub mod protocol;
pub mod request;
pub mod transport;

pub use engine::{Ahoy, AhoyBuilder};
pub use request::{RequestBuilder, RequestInterceptor, StaticHeaders};
#[cfg(feature = "http")]
pub use transport::ReqwestTransport;

pub use ahoy_storage::{MemoryStore, SqliteStore};
pub use ahoy_tokens::{TokenManager, TrackingContext};
