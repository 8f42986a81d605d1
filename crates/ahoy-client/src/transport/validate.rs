//! Status validation shared by visit and event submissions.

use ahoy_core::constants::ACCEPTABLE_STATUS;
use ahoy_core::errors::TrackingError;
use ahoy_core::HttpResponse;

/// Pass through responses with a status in 200..=399; anything else becomes
/// `UnacceptableResponse` carrying the status and body.
pub fn validate(response: HttpResponse) -> Result<HttpResponse, TrackingError> {
    if ACCEPTABLE_STATUS.contains(&response.status) {
        Ok(response)
    } else {
        Err(TrackingError::UnacceptableResponse {
            code: response.status,
            body: response.body,
        })
    }
}
