//! Structured log events for key tracking operations.
//!
//! Each function emits a `tracing` event with structured fields. Tokens are
//! logged; property values never are.

/// Log a newly issued token.
pub fn token_issued(slot: &str, expires: bool) {
    tracing::debug!(
        event = "token_issued",
        slot = %slot,
        expires = expires,
        "token issued"
    );
}

/// Log a confirmed visit.
pub fn visit_confirmed(visitor_token: &str, visit_token: &str, params: usize) {
    tracing::info!(
        event = "visit_confirmed",
        visitor_token = %visitor_token,
        visit_token = %visit_token,
        params = params,
        "visit confirmed"
    );
}

/// Log a visit confirmation rejected because the echo did not match.
pub fn visit_rejected(expected: &str, received: &str) {
    tracing::warn!(
        event = "visit_rejected",
        expected = %expected,
        received = %received,
        "visit confirmation echoed mismatching tokens"
    );
}

/// Log a successful event submission.
pub fn events_submitted(visit_token: &str, count: usize) {
    tracing::debug!(
        event = "events_submitted",
        visit_token = %visit_token,
        count = count,
        "events submitted"
    );
}

/// Log a retry of a fire-and-forget submission.
pub fn retry_scheduled(name: &str, attempt: u32, max_retries: u32, backoff_ms: u64, error: &str) {
    tracing::debug!(
        event = "retry_scheduled",
        name = %name,
        attempt = attempt,
        max_retries = max_retries,
        backoff_ms = backoff_ms,
        error = %error,
        "retrying event submission"
    );
}

/// Log a fire-and-forget submission abandoned after all retries.
pub fn event_dropped(name: &str, attempts: u32, error: &str) {
    tracing::warn!(
        event = "event_dropped",
        name = %name,
        attempts = attempts,
        error = %error,
        "event dropped after exhausting retries"
    );
}
