//! Wire and storage constants shared across the workspace.

/// Storage key of the long-lived visitor token slot.
pub const VISITOR_TOKEN_KEY: &str = "ahoy_visitor_token";

/// Storage key of the expiring visit token slot.
pub const VISIT_TOKEN_KEY: &str = "ahoy_visit_token";

/// Header carrying the visitor token.
pub const HEADER_VISITOR: &str = "Ahoy-Visitor";

/// Header carrying the visit token.
pub const HEADER_VISIT: &str = "Ahoy-Visit";

pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Inclusive range of HTTP status codes treated as success.
pub const ACCEPTABLE_STATUS: std::ops::RangeInclusive<u16> = 200..=399;
