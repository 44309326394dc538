//! Endpoint errors and their HTTP responses
//!
//! | Error                          | Status | Body                              |
//! |--------------------------------|--------|-----------------------------------|
//! | `Rejected(PreconditionRequired)` | 403 or 428 (config) | empty               |
//! | `Rejected(PreconditionFailed)`   | 412    | empty                             |
//! | `NotFound`                     | 404    | `{"detail": "Not found."}`        |
//! | `MethodNotAllowed`             | 405    | `{"detail": ...}` + `Allow`       |
//! | `MalformedJson`                | 400    | `{"detail": ...}`                 |
//! | `Validation`                   | 400    | `{"<field>": ["<message>"]}`      |
//! | `Store` / `Header`             | 500    | `{"detail": ...}`                 |

use http::header::{ALLOW, CONTENT_TYPE};
use http::{HeaderValue, Method, Response, StatusCode};
use occgate_core::{Error, GuardConfig, Rejection};
use serde_json::json;
use thiserror::Error;

/// Methods the document endpoint serves
pub const ALLOWED_METHODS: &str = "GET, PUT, PATCH, HEAD, OPTIONS";

/// Failure while serving a document request
#[derive(Debug, Error)]
pub enum EndpointError {
    /// Conditional write refused by the guard or by the store's compare-and-swap
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// No such document
    #[error("Not found")]
    NotFound,

    /// Method outside `ALLOWED_METHODS`
    #[error("Method {0} not allowed")]
    MethodNotAllowed(Method),

    /// Request body is not JSON
    #[error("JSON parse error - {0}")]
    MalformedJson(String),

    /// Request body is JSON but not a valid document
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Offending field (`text`, or `non_field_errors`)
        field: &'static str,
        /// Human-readable reason
        message: &'static str,
    },

    /// Store failure other than not-found / conflict
    #[error("Store error: {0}")]
    Store(Error),

    /// Response header could not be built
    #[error("Header error: {0}")]
    Header(String),
}

impl From<Error> for EndpointError {
    fn from(e: Error) -> Self {
        match e {
            Error::NotFound(_) => EndpointError::NotFound,
            Error::Rejected(r) => EndpointError::Rejected(r),
            other => EndpointError::Store(other),
        }
    }
}

impl EndpointError {
    /// HTTP status for this error
    pub fn status(&self, config: &GuardConfig) -> StatusCode {
        match self {
            EndpointError::Rejected(Rejection::PreconditionRequired) => {
                StatusCode::from_u16(config.missing_precondition_status)
                    .unwrap_or(StatusCode::FORBIDDEN)
            }
            EndpointError::Rejected(Rejection::PreconditionFailed { .. }) => {
                StatusCode::PRECONDITION_FAILED
            }
            EndpointError::NotFound => StatusCode::NOT_FOUND,
            EndpointError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            EndpointError::MalformedJson(_) | EndpointError::Validation { .. } => {
                StatusCode::BAD_REQUEST
            }
            EndpointError::Store(_) | EndpointError::Header(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// JSON body for this error, `None` for guard rejections
    fn body(&self) -> Option<serde_json::Value> {
        match self {
            EndpointError::Rejected(_) => None,
            EndpointError::NotFound => Some(json!({ "detail": "Not found." })),
            EndpointError::MethodNotAllowed(method) => Some(json!({
                "detail": format!("Method \"{}\" not allowed.", method)
            })),
            EndpointError::MalformedJson(_) => Some(json!({ "detail": self.to_string() })),
            EndpointError::Validation { field, message } => {
                let mut errors = serde_json::Map::new();
                errors.insert(field.to_string(), json!([message]));
                Some(serde_json::Value::Object(errors))
            }
            EndpointError::Store(_) | EndpointError::Header(_) => {
                Some(json!({ "detail": "A server error occurred." }))
            }
        }
    }

    /// Render as an HTTP response
    pub fn into_response(self, config: &GuardConfig) -> Response<Vec<u8>> {
        let body = self
            .body()
            .map(|v| serde_json::to_vec(&v).unwrap_or_default())
            .unwrap_or_default();
        let has_body = !body.is_empty();

        let mut response = Response::new(body);
        *response.status_mut() = self.status(config);
        if has_body {
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let EndpointError::MethodNotAllowed(_) = self {
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        }
        response
    }
}
