//! Document endpoint: GET / HEAD / PUT / PATCH / OPTIONS on `/api/document/<pk>`
//!
//! Every GET, HEAD and write goes through a [`ConcurrencyGuard`]:
//! - GET returns `{"text": ...}` with the current `ETag`
//! - HEAD is GET without the body
//! - PUT replaces `text` (required, not blank)
//! - PATCH updates `text` if given, otherwise leaves the document as is
//! - OPTIONS describes the endpoint and lists the allowed methods
//!
//! Both writes require `If-Match`. The write handler repeats the comparison
//! inside the store's compare-and-swap, so a writer that slips in between the
//! guard's check and the write turns this request into a 412 instead of a
//! lost update.
//!
//! The `ETag` of a response is the fingerprint of the document in its body.
//! Handlers record the document they answer with on the request, and the
//! endpoint's fingerprint provider uses that document once it is set rather
//! than reading the store a second time.

use crate::error::{EndpointError, ALLOWED_METHODS};
use crate::headers::{attach_etag, fingerprint_token, if_match};
use crate::route::document_key;
use http::header::{ALLOW, CONTENT_TYPE};
use http::{HeaderValue, Method, Request, Response, StatusCode};
use occgate_concurrency::{
    ConcurrencyGuard, ConditionalRequest, ResourceAddress, StoreFingerprint, Tagged,
};
use occgate_core::{
    Fingerprint, FingerprintProvider, Fingerprinted, GuardConfig, ResourceKey, ResourceStore,
};
use occgate_storage::Document;
use once_cell::unsync::OnceCell;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// A request routed to one document
#[derive(Debug)]
pub struct DocumentRequest<'a> {
    /// Addressed document
    pub key: ResourceKey,
    /// Raw `If-Match` value
    pub if_match: Option<String>,
    /// Request body
    pub body: &'a [u8],
    /// Document the response is built from, set by the handler
    served: OnceCell<Document>,
}

impl<'a> DocumentRequest<'a> {
    /// Request for `key` with an optional `If-Match` and a body
    pub fn new(key: ResourceKey, if_match: Option<String>, body: &'a [u8]) -> Self {
        Self {
            key,
            if_match,
            body,
            served: OnceCell::new(),
        }
    }

    /// Document the response was built from, once a handler has produced it
    pub fn served(&self) -> Option<&Document> {
        self.served.get()
    }

    /// Record `document` as the response content
    fn serve(&self, document: Document) -> Document {
        self.served.get_or_init(|| document).clone()
    }
}

impl ConditionalRequest for DocumentRequest<'_> {
    fn if_match(&self) -> Option<&str> {
        self.if_match.as_deref()
    }
}

impl ResourceAddress for DocumentRequest<'_> {
    fn resource_key(&self) -> ResourceKey {
        self.key
    }
}

/// Kind of update carried by a write request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpdateMode {
    /// PUT: every field required
    Full,
    /// PATCH: fields optional
    Partial,
}

/// Parse and validate the `text` field of a write body
///
/// Returns `None` when a partial update leaves `text` out. Strings are
/// trimmed; numbers are accepted in their JSON spelling.
fn parse_text(body: &[u8], mode: UpdateMode) -> Result<Option<String>, EndpointError> {
    let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_slice(body).map_err(|e| EndpointError::MalformedJson(e.to_string()))?
    };

    let Value::Object(fields) = value else {
        return Err(EndpointError::Validation {
            field: "non_field_errors",
            message: "Invalid data. Expected a dictionary.",
        });
    };

    let text = match fields.get("text") {
        None if mode == UpdateMode::Partial => return Ok(None),
        None => {
            return Err(EndpointError::Validation {
                field: "text",
                message: "This field is required.",
            })
        }
        Some(Value::Null) => {
            return Err(EndpointError::Validation {
                field: "text",
                message: "This field may not be null.",
            })
        }
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => {
            return Err(EndpointError::Validation {
                field: "text",
                message: "Not a valid string.",
            })
        }
    };

    if text.is_empty() {
        return Err(EndpointError::Validation {
            field: "text",
            message: "This field may not be blank.",
        });
    }
    Ok(Some(text))
}

/// HTTP endpoint for documents held in a store
pub struct DocumentEndpoint<S> {
    store: Arc<S>,
    fingerprints: StoreFingerprint<S>,
    config: GuardConfig,
}

impl<S> DocumentEndpoint<S>
where
    S: ResourceStore<Content = Document>,
{
    /// Endpoint over `store`
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not pass [`GuardConfig::validate`].
    pub fn new(store: Arc<S>, config: GuardConfig) -> occgate_core::Result<Self> {
        config.validate()?;
        Ok(Self {
            fingerprints: StoreFingerprint::new(Arc::clone(&store)),
            store,
            config,
        })
    }

    /// The backing store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Active configuration
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Serve one request
    ///
    /// Never fails: every error is rendered as a response.
    pub fn handle(&self, request: &Request<Vec<u8>>) -> Response<Vec<u8>> {
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        let response = self.dispatch(request).unwrap_or_else(|e| {
            if let EndpointError::Store(inner) = &e {
                warn!(target: "occgate::http", %method, %path, error = %inner, "store failure");
            }
            e.into_response(&self.config)
        });
        debug!(
            target: "occgate::http",
            %method,
            %path,
            status = response.status().as_u16(),
            "request handled"
        );
        response
    }

    fn dispatch(
        &self,
        request: &Request<Vec<u8>>,
    ) -> Result<Response<Vec<u8>>, EndpointError> {
        let key = document_key(request.uri().path()).ok_or(EndpointError::NotFound)?;
        let ctx = DocumentRequest::new(key, if_match(request.headers()), request.body());

        let guard = ConcurrencyGuard::new(
            |ctx: &DocumentRequest<'_>| self.etag(ctx),
            |ctx: &DocumentRequest<'_>| self.retrieve(ctx),
            |ctx: &DocumentRequest<'_>| self.update(ctx, mode_for(request.method())),
        );

        match *request.method() {
            Method::GET => self.render(guard.read(&ctx)?, true),
            Method::HEAD => self.render(guard.read(&ctx)?, false),
            Method::PUT | Method::PATCH => self.render(guard.write(&ctx)?, true),
            Method::OPTIONS => Ok(describe()),
            ref other => Err(EndpointError::MethodNotAllowed(other.clone())),
        }
    }

    /// Fingerprint as rendered in `ETag` / expected in `If-Match`
    ///
    /// Before a handler has run this is the stored document's fingerprint;
    /// afterwards it is the fingerprint of the document the handler served.
    fn etag(&self, ctx: &DocumentRequest<'_>) -> Result<Fingerprint, EndpointError> {
        let fingerprint = match ctx.served() {
            Some(document) => document.fingerprint(),
            None => self.fingerprints.compute(ctx)?,
        };
        Ok(Fingerprint::from_token(self.config.etag_value(&fingerprint)))
    }

    fn retrieve(&self, ctx: &DocumentRequest<'_>) -> Result<Document, EndpointError> {
        Ok(ctx.serve(self.store.read(&ctx.key)?))
    }

    fn update(
        &self,
        ctx: &DocumentRequest<'_>,
        mode: UpdateMode,
    ) -> Result<Document, EndpointError> {
        let Some(text) = parse_text(ctx.body, mode)? else {
            return self.retrieve(ctx);
        };
        // The guard has already matched If-Match; repeat it atomically in the store.
        let expected = ctx
            .if_match
            .as_deref()
            .map(|v| fingerprint_token(&self.config, v))
            .unwrap_or_default();
        let written = self
            .store
            .compare_and_swap(&ctx.key, expected, Document::new(text))?;
        Ok(ctx.serve(written))
    }

    fn render(
        &self,
        tagged: Tagged<Document>,
        with_body: bool,
    ) -> Result<Response<Vec<u8>>, EndpointError> {
        let body = if with_body {
            serde_json::to_vec(&tagged.body).map_err(|e| EndpointError::Store(e.into()))?
        } else {
            Vec::new()
        };
        let mut response = Response::new(body);
        *response.status_mut() = StatusCode::OK;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        attach_etag(&mut response, &tagged.etag)?;
        Ok(response)
    }
}

/// OPTIONS response: endpoint metadata plus `Allow`
fn describe() -> Response<Vec<u8>> {
    let metadata = json!({
        "name": "Document",
        "description": "",
        "renders": ["application/json"],
        "parses": ["application/json"],
    });
    let mut response = Response::new(serde_json::to_vec(&metadata).unwrap_or_default());
    *response.status_mut() = StatusCode::OK;
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
    response
}

fn mode_for(method: &Method) -> UpdateMode {
    if *method == Method::PATCH {
        UpdateMode::Partial
    } else {
        UpdateMode::Full
    }
}
