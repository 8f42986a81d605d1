//! Canonical value encoding.
//!
//! Property maps encode to JSON objects with keys in ascending order, so the
//! same logical input always produces the same bytes. When caller keys share
//! an object with fixed fields, the fixed fields come first in their declared
//! order and the caller keys follow, sorted.

use serde::ser::SerializeMap;
use serde_json::{Map, Value};

use ahoy_core::{Properties, ScalarValue};

/// JSON form of a single scalar. Non-finite floats become `null`.
pub fn encode_value(value: &ScalarValue) -> Value {
    match value {
        ScalarValue::Boolean(b) => Value::Bool(*b),
        ScalarValue::Integer(i) => Value::from(*i),
        ScalarValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ScalarValue::String(s) => Value::String(s.clone()),
    }
}

/// Encode a property map into a JSON object.
pub fn encode(properties: &Properties) -> Value {
    let object: Map<String, Value> = properties
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect();
    Value::Object(object)
}

/// Write caller-supplied `extra` entries after fixed fields that were already
/// written to `map`. Keys colliding with `fixed` are dropped.
pub fn serialize_extra<M>(map: &mut M, fixed: &[&str], extra: &Properties) -> Result<(), M::Error>
where
    M: SerializeMap,
{
    for (key, value) in extra {
        if fixed.contains(&key.as_str()) {
            tracing::warn!(key = %key, "dropping caller parameter that shadows a fixed field");
            continue;
        }
        map.serialize_entry(key, value)?;
    }
    Ok(())
}
