//! Wire encoding: property maps, visit bodies, event bodies.

use proptest::prelude::*;
use serde_json::json;

use ahoy_client::encoding::{encode, encode_value};
use ahoy_client::protocol::{EventRequest, VisitRequest, VisitResponse};
use ahoy_core::{ApplicationEnvironment, Event, Properties, ScalarValue, TokenPair, Visit};
use test_fixtures::{epoch_plus, VISITOR_UUID, VISIT_UUID_1};

// ─── Helpers ───────────────────────────────────────────────

fn env() -> ApplicationEnvironment {
    ApplicationEnvironment::new("iOS", "9.9.99", "16.0.2")
}

fn visit(params: Option<Properties>) -> Visit {
    Visit::new(TokenPair::new(VISITOR_UUID, VISIT_UUID_1), params)
}

fn visit_body(visit: &Visit) -> String {
    let env = env();
    serde_json::to_string(&VisitRequest::new(visit, &env)).unwrap()
}

fn fixed_prefix() -> String {
    format!(
        r#"{{"visitor_token":"{VISITOR_UUID}","visit_token":"{VISIT_UUID_1}","platform":"iOS","app_version":"9.9.99","os_version":"16.0.2""#
    )
}

// ─── Scalar encoding ───────────────────────────────────────

#[test]
fn scalars_encode_to_natural_json() {
    assert_eq!(encode_value(&ScalarValue::from("a")), json!("a"));
    assert_eq!(encode_value(&ScalarValue::from(7)), json!(7));
    assert_eq!(encode_value(&ScalarValue::from(1.5)), json!(1.5));
    assert_eq!(encode_value(&ScalarValue::from(true)), json!(true));
    assert_eq!(encode_value(&ScalarValue::Float(f64::NAN)), json!(null));
    assert_eq!(encode_value(&ScalarValue::Float(f64::INFINITY)), json!(null));
}

#[test]
fn encode_keeps_keys_sorted() {
    let mut props = Properties::new();
    props.insert("zeta".into(), 1.into());
    props.insert("alpha".into(), "x".into());
    props.insert("mid".into(), false.into());

    let encoded = encode(&props);
    assert_eq!(encoded, json!({"alpha": "x", "mid": false, "zeta": 1}));
    assert_eq!(
        serde_json::to_string(&encoded).unwrap(),
        r#"{"alpha":"x","mid":false,"zeta":1}"#
    );
}

#[test]
fn dates_become_iso_strings() {
    let mut props = Properties::new();
    props.insert("signed_up".into(), epoch_plus(86_400).into());
    assert_eq!(encode(&props), json!({"signed_up": "1970-01-02T00:00:00Z"}));
}

// ─── Visit body ────────────────────────────────────────────

#[test]
fn visit_body_without_params_has_fixed_fields_in_order() {
    let body = visit_body(&visit(None));
    assert_eq!(body, format!("{}}}", fixed_prefix()));
}

#[test]
fn visit_params_follow_fixed_fields_sorted() {
    let mut first = Properties::new();
    first.insert("utm_source".into(), "some-place".into());
    first.insert("source".into(), 3.into());

    let mut second = Properties::new();
    second.insert("source".into(), 3.into());
    second.insert("utm_source".into(), "some-place".into());

    let a = visit_body(&visit(Some(first)));
    let b = visit_body(&visit(Some(second)));

    assert_eq!(a, b);
    assert_eq!(
        a,
        format!(r#"{},"source":3,"utm_source":"some-place"}}"#, fixed_prefix())
    );
}

#[test]
fn visit_params_cannot_shadow_fixed_fields() {
    let mut params = Properties::new();
    params.insert("platform".into(), "spoofed".into());
    params.insert("visit_token".into(), "other".into());
    params.insert("campaign".into(), "spring".into());

    let body = visit_body(&visit(Some(params)));
    assert_eq!(body, format!(r#"{},"campaign":"spring"}}"#, fixed_prefix()));
}

#[test]
fn visit_response_ignores_extra_fields() {
    let response: VisitResponse = serde_json::from_str(
        r#"{"visit_token":"b","visitor_token":"a","platform":"iOS","extra":1}"#,
    )
    .unwrap();
    assert_eq!(TokenPair::from(response), TokenPair::new("a", "b"));
}

// ─── Event body ────────────────────────────────────────────

#[test]
fn event_body_with_user_id() {
    let visit = visit(None).with_user_id(Some("12345".into()));
    let mut props = Properties::new();
    props.insert("123".into(), 456.into());
    let events = vec![Event::new("test", props, epoch_plus(0))];

    let body = serde_json::to_string(&EventRequest::new(&visit, &events)).unwrap();
    assert_eq!(
        body,
        format!(
            r#"{{"visitor_token":"{VISITOR_UUID}","visit_token":"{VISIT_UUID_1}","events":[{{"name":"test","properties":{{"123":456}},"time":"1970-01-01T00:00:00Z","user_id":"12345"}}]}}"#
        )
    );
}

#[test]
fn event_body_without_user_id_and_with_event_id() {
    let visit = visit(None);
    let events = vec![
        Event::new("first", Properties::new(), epoch_plus(1)).with_id("evt-1"),
        Event::new("second", Properties::new(), epoch_plus(2)),
    ];

    let value = serde_json::to_value(EventRequest::new(&visit, &events)).unwrap();
    assert_eq!(
        value["events"],
        json!([
            {"id": "evt-1", "name": "first", "properties": {}, "time": "1970-01-01T00:00:01Z"},
            {"name": "second", "properties": {}, "time": "1970-01-01T00:00:02Z"},
        ])
    );

    let text = serde_json::to_string(&EventRequest::new(&visit, &events)).unwrap();
    assert!(text.contains(r#"{"id":"evt-1","name":"first""#));
    assert!(!text.contains("user_id"));
}

// ─── Properties ────────────────────────────────────────────

proptest! {
    #[test]
    fn visit_body_is_fixed_prefix_then_sorted_params(
        params in prop::collection::btree_map("[a-z_]{1,12}", any::<i64>(), 0..8)
    ) {
        let props: Properties = params
            .iter()
            .map(|(k, v)| (k.clone(), ScalarValue::from(*v)))
            .collect();
        let body = visit_body(&visit(Some(props)));
        prop_assert!(body.starts_with(&fixed_prefix()));

        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        let object = parsed.as_object().unwrap();
        for (key, value) in &params {
            if ahoy_client::protocol::VISIT_FIXED_FIELDS.contains(&key.as_str()) {
                continue;
            }
            prop_assert_eq!(object.get(key), Some(&json!(value)));
        }

        // Caller keys appear in ascending order after the fixed fields.
        let mut last_pos = fixed_prefix().len();
        for key in params.keys() {
            if ahoy_client::protocol::VISIT_FIXED_FIELDS.contains(&key.as_str()) {
                continue;
            }
            let needle = format!(r#","{key}":"#);
            let pos = body[last_pos..].find(&needle).map(|p| p + last_pos);
            prop_assert!(pos.is_some());
            last_pos = pos.unwrap_or(last_pos);
        }
    }
}
