use chrono::{TimeZone, Utc};

use ahoy_core::models::timestamp;
use ahoy_core::{Event, Properties, ScalarValue, TokenPair, Visit};

#[test]
fn scalar_values_serialize_naturally() {
    assert_eq!(serde_json::to_string(&ScalarValue::from("x")).unwrap(), "\"x\"");
    assert_eq!(serde_json::to_string(&ScalarValue::from(3)).unwrap(), "3");
    assert_eq!(serde_json::to_string(&ScalarValue::from(1.5)).unwrap(), "1.5");
    assert_eq!(serde_json::to_string(&ScalarValue::from(true)).unwrap(), "true");
}

#[test]
fn non_finite_floats_serialize_as_null() {
    assert_eq!(serde_json::to_string(&ScalarValue::Float(f64::NAN)).unwrap(), "null");
}

#[test]
fn scalar_values_deserialize_to_the_narrowest_variant() {
    let v: ScalarValue = serde_json::from_str("42").unwrap();
    assert_eq!(v, ScalarValue::Integer(42));
    let v: ScalarValue = serde_json::from_str("4.2").unwrap();
    assert_eq!(v, ScalarValue::Float(4.2));
    let v: ScalarValue = serde_json::from_str("false").unwrap();
    assert_eq!(v, ScalarValue::Boolean(false));
    let v: ScalarValue = serde_json::from_str("\"hi\"").unwrap();
    assert_eq!(v, ScalarValue::String("hi".into()));
}

#[test]
fn dates_become_iso8601_strings() {
    let ts = Utc.timestamp_opt(0, 0).unwrap();
    assert_eq!(ScalarValue::from(ts), ScalarValue::String("1970-01-01T00:00:00Z".into()));
    assert_eq!(timestamp::to_wire(&ts), "1970-01-01T00:00:00Z");
}

#[test]
fn property_maps_iterate_in_key_order() {
    let mut props = Properties::new();
    props.insert("utm_source".into(), "some-place".into());
    props.insert("source".into(), 3.into());

    let keys: Vec<&str> = props.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["source", "utm_source"]);
    assert_eq!(
        serde_json::to_string(&props).unwrap(),
        r#"{"source":3,"utm_source":"some-place"}"#
    );
}

#[test]
fn scalar_accessors() {
    assert_eq!(ScalarValue::from("a").as_str(), Some("a"));
    assert_eq!(ScalarValue::from(7u8).as_i64(), Some(7));
    assert_eq!(ScalarValue::from(7).as_f64(), Some(7.0));
    assert_eq!(ScalarValue::from(true).as_bool(), Some(true));
    assert_eq!(ScalarValue::from(true).as_str(), None);
}

#[test]
fn visit_user_id_can_be_attached_and_cleared() {
    let mut visit = Visit::new(TokenPair::new("visitor", "visit"), None);
    assert_eq!(visit.user_id(), None);

    visit.set_user_id(Some("12345".into()));
    assert_eq!(visit.user_id(), Some("12345"));
    assert_eq!(visit.visitor_token(), "visitor");
    assert_eq!(visit.visit_token(), "visit");

    visit.set_user_id(None);
    assert_eq!(visit.user_id(), None);
}

#[test]
fn event_builder_sets_optional_id() {
    let ts = Utc.timestamp_opt(10, 0).unwrap();
    let event = Event::new("opened", Properties::new(), ts).with_id("evt-1");
    assert_eq!(event.id(), Some("evt-1"));
    assert_eq!(event.name(), "opened");
    assert_eq!(event.timestamp(), ts);
}

#[test]
fn token_pair_display_names_both_tokens() {
    let pair = TokenPair::new("a", "b");
    assert_eq!(pair.to_string(), "visitor=a visit=b");
}
