//! Error types for occgate
//!
//! This module defines the error types shared by every crate in the workspace.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Two families live here:
//! - [`Rejection`]: the guard's own per-request outcomes. Side-effect free,
//!   never fatal, always a signal for the *client* to act.
//! - [`Error`]: failures of the collaborators (store, serialization, config).

use crate::fingerprint::Fingerprint;
use crate::types::ResourceKey;
use std::io;
use thiserror::Error;

/// Result type alias for occgate operations
pub type Result<T> = std::result::Result<T, Error>;

/// A conditional write refused before the write handler ran
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The request carried no `If-Match` value
    #[error("Precondition required: request carries no If-Match value")]
    PreconditionRequired,

    /// The request's `If-Match` value is not the resource's current fingerprint
    #[error("Precondition failed: If-Match {provided:?} does not match current {current}")]
    PreconditionFailed {
        /// Token supplied by the client
        provided: String,
        /// Fingerprint of the resource at validation time
        current: Fingerprint,
    },
}

impl Rejection {
    /// Check if this rejection is a stale-token conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Rejection::PreconditionFailed { .. })
    }
}

/// Error types for occgate
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (config files)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Resource not found in storage
    #[error("Resource not found: {0}")]
    NotFound(ResourceKey),

    /// Invalid input (malformed key, bad config value)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Conditional write refused
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl Error {
    /// Get the rejection carried by this error, if any
    pub fn as_rejection(&self) -> Option<&Rejection> {
        match self {
            Error::Rejected(r) => Some(r),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
