//! HTTP binding for occgate
//!
//! Maps the guard onto the `http` crate's request/response types:
//! - `If-Match` request header carries the client's expected fingerprint
//! - `ETag` response header carries the fingerprint after the operation
//! - Missing `If-Match` on a write: 403 (or 428, see `GuardConfig`)
//! - Stale `If-Match`: 412
//!
//! [`DocumentEndpoint`] serves `/api/document/<pk>` over any
//! `ResourceStore<Content = Document>`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod headers;
pub mod route;

pub use document::{DocumentEndpoint, DocumentRequest};
pub use error::{EndpointError, ALLOWED_METHODS};
pub use headers::{attach_etag, fingerprint_token, if_match};
pub use route::{document_key, document_path, DOCUMENT_PREFIX};
