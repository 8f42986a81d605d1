//! Transport layer: response validation and the default reqwest transport.

#[cfg(feature = "http")]
pub mod http_client;
pub mod validate;

#[cfg(feature = "http")]
pub use http_client::ReqwestTransport;
pub use validate::validate;
