//! Visit/event tracking errors.

use crate::models::TokenPair;

/// Failures of the tracking state machine.
#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    /// No visit has been confirmed with the collector yet.
    #[error("no visit has been confirmed with the server")]
    NoVisit,

    /// The collector echoed tokens that differ from the ones the client sent.
    #[error("server replied with visit {received} but the client sent {expected}")]
    MismatchingVisit {
        expected: TokenPair,
        received: TokenPair,
    },

    /// The collector answered with a status outside the accepted range.
    #[error("unacceptable response: HTTP {code} ({} bytes)", body.len())]
    UnacceptableResponse { code: u16, body: Vec<u8> },

    /// The visit confirmation body could not be decoded.
    #[error("malformed visit response: {reason}")]
    MalformedResponse { reason: String },
}

impl TrackingError {
    /// Response body as lossy UTF-8, for diagnostics.
    pub fn body_text(&self) -> Option<String> {
        match self {
            TrackingError::UnacceptableResponse { body, .. } => {
                Some(String::from_utf8_lossy(body).into_owned())
            }
            _ => None,
        }
    }
}
