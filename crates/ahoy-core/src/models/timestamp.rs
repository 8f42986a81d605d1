//! ISO-8601 wire format for timestamps: UTC, second precision, `Z` suffix.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

pub fn to_wire(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// `serialize_with` adapter.
pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_wire(ts))
}
