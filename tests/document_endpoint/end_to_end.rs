//! The hello -> world scenario, step by step.

use crate::common::*;
use http::StatusCode;
use occgate::Fingerprint;

#[test]
fn test_hello_world_scenario() {
    let endpoint = endpoint("hello");
    let f1 = Fingerprint::of(b"hello");

    // GET returns body and F1
    let response = endpoint.handle(&get(DOC));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text(&response), "hello");
    assert_eq!(etag(&response), f1.as_str());

    // PUT without If-Match -> 403, unchanged
    let response = endpoint.handle(&put(DOC, None, "world"));
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(response.body().is_empty());
    assert_eq!(stored_text(&endpoint), "hello");

    // PUT with a wrong token -> 412, unchanged
    let response = endpoint.handle(&put(DOC, Some("wrong"), "world"));
    assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
    assert_eq!(stored_text(&endpoint), "hello");

    // PUT with F1 -> 200, world, F2
    let response = endpoint.handle(&put(DOC, Some(f1.as_str()), "world"));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text(&response), "world");
    let f2 = etag(&response);
    assert_eq!(f2, Fingerprint::of(b"world").as_str());
    assert_ne!(f2, f1.as_str());
    assert_eq!(stored_text(&endpoint), "world");

    // A later GET agrees with the PUT's ETag
    let response = endpoint.handle(&get(DOC));
    assert_eq!(text(&response), "world");
    assert_eq!(etag(&response), f2);
}

#[test]
fn test_read_fingerprint_is_stable() {
    let endpoint = endpoint("hello");
    let first = etag(&endpoint.handle(&get(DOC)));
    for _ in 0..10 {
        assert_eq!(etag(&endpoint.handle(&get(DOC))), first);
    }
}

#[test]
fn test_client_chains_writes_with_returned_etag() {
    let endpoint = endpoint("v0");
    let mut token = etag(&endpoint.handle(&get(DOC)));
    for i in 1..=5 {
        let next = format!("v{}", i);
        let response = endpoint.handle(&put(DOC, Some(&token), &next));
        assert_eq!(response.status(), StatusCode::OK);
        token = etag(&response);
        assert_eq!(token, Fingerprint::of(next.as_bytes()).as_str());
    }
    assert_eq!(stored_text(&endpoint), "v5");
    assert_eq!(endpoint.store().write_count(), 5);
}

#[test]
fn test_unknown_document_is_404() {
    let endpoint = endpoint("hello");
    let missing = occgate::ResourceKey::new(404);

    let response = endpoint.handle(&get(missing));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = endpoint.handle(&put(missing, Some("anything"), "x"));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_unrouted_path_is_404() {
    let endpoint = endpoint("hello");
    let request = http::Request::get("/api/other/1").body(Vec::new()).unwrap();
    assert_eq!(endpoint.handle(&request).status(), StatusCode::NOT_FOUND);
}
