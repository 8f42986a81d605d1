//! Request assembly: URLs, interceptors, forced headers, status validation.

use std::sync::Arc;

use serde_json::json;

use ahoy_client::request::{InterceptorChain, RequestBuilder, RequestInterceptor, StaticHeaders};
use ahoy_client::transport::validate;
use ahoy_core::errors::TrackingError;
use ahoy_core::{HttpRequest, HttpResponse, TokenPair};

fn tokens() -> TokenPair {
    TokenPair::new("visitor-1", "visit-1")
}

// ─── URL resolution ────────────────────────────────────────

#[test]
fn url_joins_segments_with_single_slashes() {
    let cases = [
        ("https://ahoy.com", "ahoy", "visits"),
        ("https://ahoy.com/", "ahoy", "visits"),
        ("https://ahoy.com", "/ahoy/", "/visits"),
        ("https://ahoy.com//", "ahoy/", "visits/"),
    ];
    for (base, ahoy_path, path) in cases {
        let builder = RequestBuilder::new(base, ahoy_path);
        assert_eq!(builder.url(path), "https://ahoy.com/ahoy/visits", "{base} {ahoy_path} {path}");
    }
}

#[test]
fn url_keeps_nested_paths() {
    let builder = RequestBuilder::new("https://example.com/api/", "test-ahoy");
    assert_eq!(builder.url("my-events"), "https://example.com/api/test-ahoy/my-events");
    assert_eq!(builder.url("v2/my-events"), "https://example.com/api/test-ahoy/v2/my-events");
}

// ─── Build ─────────────────────────────────────────────────

#[test]
fn build_posts_json_with_visit_headers() {
    let builder = RequestBuilder::new("https://ahoy.com", "ahoy");
    let request = builder
        .build("events", &json!({"a": 1}), &tokens(), &[])
        .unwrap();

    assert_eq!(request.method, "POST");
    assert_eq!(request.url, "https://ahoy.com/ahoy/events");
    assert_eq!(request.body_text(), r#"{"a":1}"#);
    assert_eq!(
        request.headers.get("content-type"),
        Some("application/json; charset=utf-8")
    );
    assert_eq!(request.headers.get("Ahoy-Visitor"), Some("visitor-1"));
    assert_eq!(request.headers.get("ahoy-visit"), Some("visit-1"));
    assert_eq!(request.headers.len(), 3);
}

#[test]
fn interceptors_run_in_order_and_forced_headers_win() {
    let first = |request: &mut HttpRequest| {
        request.headers.set("X-Order", "first");
        request.headers.set("ahoy-visit", "spoofed");
        request.headers.set("CONTENT-TYPE", "text/plain");
    };
    let second = |request: &mut HttpRequest| {
        let seen = request.headers.get("X-Order").unwrap_or_default().to_string();
        request.headers.set("X-Order", format!("{seen},second"));
        request.headers.set("X-Url", request.url.clone());
    };
    let interceptors: Vec<Arc<dyn RequestInterceptor>> = vec![Arc::new(first), Arc::new(second)];

    let builder = RequestBuilder::new("https://ahoy.com", "ahoy");
    let request = builder
        .build("visits", &json!({}), &tokens(), &interceptors)
        .unwrap();

    assert_eq!(request.headers.get("X-Order"), Some("first,second"));
    assert_eq!(request.headers.get("X-Url"), Some("https://ahoy.com/ahoy/visits"));
    assert_eq!(request.headers.get("Ahoy-Visit"), Some("visit-1"));
    assert_eq!(
        request.headers.get("Content-Type"),
        Some("application/json; charset=utf-8")
    );
    // Replaced, not duplicated.
    assert_eq!(
        request
            .headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("ahoy-visit"))
            .count(),
        1
    );
}

#[test]
fn static_headers_interceptor() {
    let interceptors: Vec<Arc<dyn RequestInterceptor>> = vec![Arc::new(
        StaticHeaders::new().header("X-App", "demo").bearer("secret"),
    )];
    let request = RequestBuilder::new("https://ahoy.com", "ahoy")
        .build("events", &json!({}), &tokens(), &interceptors)
        .unwrap();

    assert_eq!(request.headers.get("x-app"), Some("demo"));
    assert_eq!(request.headers.get("authorization"), Some("Bearer secret"));
}

#[test]
fn interceptor_chain_is_mutable() {
    let chain = InterceptorChain::default();
    assert!(chain.is_empty());

    chain.push(Arc::new(StaticHeaders::new().header("A", "1")));
    chain.push(Arc::new(StaticHeaders::new().header("B", "2")));
    assert_eq!(chain.len(), 2);

    let snapshot = chain.snapshot();
    chain.replace(vec![Arc::new(StaticHeaders::new().header("C", "3"))]);
    assert_eq!(snapshot.len(), 2);
    assert_eq!(chain.len(), 1);

    chain.clear();
    assert!(chain.is_empty());
}

// ─── Status validation ─────────────────────────────────────

#[test]
fn status_range_boundaries() {
    for status in [200, 204, 302, 399] {
        assert!(validate(HttpResponse::new(status, "")).is_ok(), "{status}");
    }
    for status in [100, 199, 400, 404, 500] {
        let err = validate(HttpResponse::new(status, "nope")).unwrap_err();
        match err {
            TrackingError::UnacceptableResponse { code, ref body } => {
                assert_eq!(code, status);
                assert_eq!(body, b"nope");
                assert_eq!(err.body_text().as_deref(), Some("nope"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
