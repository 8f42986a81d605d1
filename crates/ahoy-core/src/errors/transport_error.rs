/// Transport-level errors. The request never produced an HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {reason}")]
    NetworkError { reason: String },

    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("failed to build HTTP client: {reason}")]
    ClientBuild { reason: String },

    #[error("no transport available: {reason}")]
    Unavailable { reason: String },
}
