//! Error handling for the Ahoy client.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod storage_error;
pub mod tracking_error;
pub mod transport_error;

pub use config_error::ConfigError;
pub use storage_error::StorageError;
pub use tracking_error::TrackingError;
pub use transport_error::TransportError;

/// Top-level error returned by every fallible client operation.
#[derive(Debug, thiserror::Error)]
pub enum AhoyError {
    #[error(transparent)]
    Tracking(#[from] TrackingError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type AhoyResult<T> = Result<T, AhoyError>;

impl AhoyError {
    /// The tracking-level error, if this is one.
    pub fn as_tracking(&self) -> Option<&TrackingError> {
        match self {
            AhoyError::Tracking(e) => Some(e),
            _ => None,
        }
    }
}
