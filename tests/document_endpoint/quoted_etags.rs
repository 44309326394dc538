//! `quote_etag = true`: the client echoes the quoted ETag.

use crate::common::*;
use http::StatusCode;
use occgate::{Fingerprint, GuardConfig};

fn quoted_endpoint(text: &str) -> occgate::DocumentEndpoint<occgate::DocumentStore> {
    endpoint_with(
        text,
        GuardConfig {
            quote_etag: true,
            ..GuardConfig::default()
        },
    )
}

#[test]
fn test_quoted_etag_roundtrip() {
    let endpoint = quoted_endpoint("hello");
    let token = etag(&endpoint.handle(&get(DOC)));
    assert_eq!(token, format!("\"{}\"", Fingerprint::of(b"hello")));

    let response = endpoint.handle(&put(DOC, Some(&token), "world"));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(etag(&response), format!("\"{}\"", Fingerprint::of(b"world")));
    assert_eq!(stored_text(&endpoint), "world");
}

#[test]
fn test_quoted_config_rejects_bare_token() {
    let endpoint = quoted_endpoint("hello");
    let bare = Fingerprint::of(b"hello");
    let response = endpoint.handle(&put(DOC, Some(bare.as_str()), "world"));
    assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
    assert_eq!(stored_text(&endpoint), "hello");
}
