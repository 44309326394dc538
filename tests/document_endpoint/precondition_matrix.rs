//! Write outcomes per method and If-Match state.

use crate::common::*;
use http::header::{ALLOW, ETAG};
use http::{Method, Request, StatusCode};
use occgate::{Fingerprint, GuardConfig};

#[test]
fn test_missing_if_match_never_writes() {
    let endpoint = endpoint("hello");
    for method in [Method::PUT, Method::PATCH] {
        let response = endpoint.handle(&write(method, DOC, None, Some("world")));
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().get(ETAG).is_none());
    }
    assert_eq!(endpoint.store().write_count(), 0);
    assert_eq!(stored_text(&endpoint), "hello");
}

#[test]
fn test_missing_if_match_428_when_configured() {
    let config = GuardConfig {
        missing_precondition_status: 428,
        ..GuardConfig::default()
    };
    let endpoint = endpoint_with("hello", config);
    let response = endpoint.handle(&put(DOC, None, "world"));
    assert_eq!(response.status(), StatusCode::PRECONDITION_REQUIRED);
    assert_eq!(stored_text(&endpoint), "hello");
}

#[test]
fn test_stale_if_match_never_writes() {
    let endpoint = endpoint("hello");
    let upper = Fingerprint::of(b"hello").as_str().to_uppercase();
    let quoted = format!("\"{}\"", Fingerprint::of(b"hello"));
    let weak = format!("W/{}", Fingerprint::of(b"hello"));
    for token in ["wrong", "", "*", upper.as_str(), quoted.as_str(), weak.as_str()] {
        for method in [Method::PUT, Method::PATCH] {
            let response = endpoint.handle(&write(method, DOC, Some(token), Some("world")));
            assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED, "{:?}", token);
        }
    }
    assert_eq!(endpoint.store().write_count(), 0);
    assert_eq!(stored_text(&endpoint), "hello");
}

#[test]
fn test_patch_with_matching_if_match() {
    let endpoint = endpoint("hello");
    let f1 = Fingerprint::of(b"hello");
    let response = endpoint.handle(&write(Method::PATCH, DOC, Some(f1.as_str()), Some("world")));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text(&response), "world");
    assert_eq!(etag(&response), Fingerprint::of(b"world").as_str());
}

#[test]
fn test_patch_without_text_keeps_document() {
    let endpoint = endpoint("hello");
    let f1 = Fingerprint::of(b"hello");
    let response = endpoint.handle(&write(Method::PATCH, DOC, Some(f1.as_str()), None));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text(&response), "hello");
    assert_eq!(etag(&response), f1.as_str());
    assert_eq!(endpoint.store().write_count(), 0);
}

#[test]
fn test_patch_without_text_still_needs_if_match() {
    let endpoint = endpoint("hello");
    let response = endpoint.handle(&write(Method::PATCH, DOC, None, None));
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[test]
fn test_put_validation_after_precondition() {
    let endpoint = endpoint("hello");
    let f1 = Fingerprint::of(b"hello");

    // Precondition is checked before the body is looked at
    let response = endpoint.handle(&write(Method::PUT, DOC, None, None));
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = endpoint.handle(&write(Method::PUT, DOC, Some(f1.as_str()), None));
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body, serde_json::json!({ "text": ["This field is required."] }));

    let response = endpoint.handle(&put(DOC, Some(f1.as_str()), "   "));
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(stored_text(&endpoint), "hello");
}

#[test]
fn test_malformed_json_is_400() {
    let endpoint = endpoint("hello");
    let f1 = Fingerprint::of(b"hello");
    let request = Request::put(occgate_http::document_path(DOC))
        .header(http::header::IF_MATCH, f1.as_str())
        .body(b"{not json".to_vec())
        .unwrap();
    let response = endpoint.handle(&request);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(stored_text(&endpoint), "hello");
}

#[test]
fn test_other_methods_not_allowed() {
    let endpoint = endpoint("hello");
    for method in [Method::DELETE, Method::POST, Method::TRACE] {
        let response = endpoint.handle(&bodiless(method, DOC));
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ALLOW], "GET, PUT, PATCH, HEAD, OPTIONS");
    }
    assert_eq!(stored_text(&endpoint), "hello");
}

#[test]
fn test_get_ignores_if_match() {
    let endpoint = endpoint("hello");
    let request = Request::get(occgate_http::document_path(DOC))
        .header(http::header::IF_MATCH, "wrong")
        .body(Vec::new())
        .unwrap();
    let response = endpoint.handle(&request);
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(etag(&response), Fingerprint::of(b"hello").as_str());
}

#[test]
fn test_head_is_get_without_body() {
    let endpoint = endpoint("hello");
    let response = endpoint.handle(&bodiless(Method::HEAD, DOC));
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.body().is_empty());
    assert_eq!(etag(&response), etag(&endpoint.handle(&get(DOC))));
    assert_eq!(endpoint.store().write_count(), 0);
}

#[test]
fn test_head_unknown_document_is_404() {
    let endpoint = endpoint("hello");
    let response = endpoint.handle(&bodiless(Method::HEAD, occgate::ResourceKey::new(99)));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_options_lists_allowed_methods() {
    let endpoint = endpoint("hello");
    let response = endpoint.handle(&bodiless(Method::OPTIONS, DOC));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[ALLOW], occgate_http::ALLOWED_METHODS);
    assert!(response.headers().get(ETAG).is_none());
    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["name"], "Document");
    assert_eq!(body["parses"], serde_json::json!(["application/json"]));
    assert_eq!(stored_text(&endpoint), "hello");
}
