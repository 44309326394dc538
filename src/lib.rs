//! occgate - optimistic concurrency control for HTTP resources
//!
//! Protects a resource from lost updates by making every mutating request
//! prove, with `If-Match`, which version of the resource it last saw. The
//! proof is a content fingerprint the server hands out in `ETag`.
//!
//! # Quick Start
//!
//! ```
//! use http::{header, Method, Request, StatusCode};
//! use occgate::{Document, DocumentEndpoint, DocumentStore, GuardConfig, ResourceKey};
//! use std::sync::Arc;
//!
//! let store = Arc::new(DocumentStore::new());
//! store.insert(ResourceKey::new(1), Document::new("hello"));
//! let endpoint = DocumentEndpoint::new(store, GuardConfig::default()).unwrap();
//!
//! let get = Request::get("/api/document/1").body(Vec::new()).unwrap();
//! let response = endpoint.handle(&get);
//! let etag = response.headers()[header::ETAG].clone();
//!
//! let put = Request::builder()
//!     .method(Method::PUT)
//!     .uri("/api/document/1")
//!     .header(header::IF_MATCH, etag)
//!     .body(br#"{"text": "world"}"#.to_vec())
//!     .unwrap();
//! assert_eq!(endpoint.handle(&put).status(), StatusCode::OK);
//! ```
//!
//! # Architecture
//!
//! - `occgate-core`: fingerprints, errors, the store contract, configuration
//! - `occgate-concurrency`: the guard and its precondition state machine
//! - `occgate-storage`: in-memory document store with compare-and-swap
//! - `occgate-http`: `If-Match` / `ETag` binding and the document endpoint

pub use occgate_concurrency::{
    check_token, ConcurrencyGuard, Conditional, ConditionalRequest, Handler, Precondition,
    ResourceAddress, StoreFingerprint, Tagged,
};
pub use occgate_core::{
    Error, Fingerprint, FingerprintProvider, Fingerprinted, GuardConfig, Rejection, ResourceKey,
    ResourceStore, Result,
};
pub use occgate_http::{DocumentEndpoint, DocumentRequest, EndpointError};
pub use occgate_storage::{Document, DocumentStore, InMemoryStore};
