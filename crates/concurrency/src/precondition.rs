//! Precondition extraction and validation
//!
//! A conditional write reaches exactly one of three states:
//!
//! | Request                    | State               | Outcome                       |
//! |----------------------------|---------------------|-------------------------------|
//! | no `If-Match`              | MissingPrecondition | `Rejection::PreconditionRequired` |
//! | `If-Match` != current      | Mismatch            | `Rejection::PreconditionFailed`   |
//! | `If-Match` == current      | Matched             | write proceeds                |
//!
//! Absence of the match field is not the same as an empty or wrong value.

use occgate_core::{Fingerprint, Rejection};

/// What the client asserted about the resource's current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition<'a> {
    /// No match field on the request
    Missing,
    /// Match field present with this token
    Provided(&'a str),
}

impl<'a> Precondition<'a> {
    /// Build from an optional match-field value
    pub fn from_if_match(if_match: Option<&'a str>) -> Self {
        match if_match {
            Some(token) => Precondition::Provided(token),
            None => Precondition::Missing,
        }
    }

    /// The asserted token
    ///
    /// # Errors
    ///
    /// `Rejection::PreconditionRequired` if the request asserted nothing.
    pub fn token(&self) -> Result<&'a str, Rejection> {
        match *self {
            Precondition::Provided(token) => Ok(token),
            Precondition::Missing => Err(Rejection::PreconditionRequired),
        }
    }

    /// Validate against the resource's current fingerprint
    pub fn validate(&self, current: &Fingerprint) -> Result<(), Rejection> {
        check_token(self.token()?, current)
    }
}

/// Compare a client token against the current fingerprint
///
/// # Errors
///
/// `Rejection::PreconditionFailed` carrying both values on mismatch.
pub fn check_token(token: &str, current: &Fingerprint) -> Result<(), Rejection> {
    if current.matches(token) {
        Ok(())
    } else {
        Err(Rejection::PreconditionFailed {
            provided: token.to_string(),
            current: current.clone(),
        })
    }
}

/// A request that may carry an expected-state token
pub trait ConditionalRequest {
    /// Raw value of the match field, `None` if the field is absent
    fn if_match(&self) -> Option<&str>;

    /// The request's precondition
    fn precondition(&self) -> Precondition<'_> {
        Precondition::from_if_match(self.if_match())
    }
}

/// Pairs any context with an optional match token
///
/// Lets non-HTTP callers drive the guard directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conditional<T> {
    /// Expected fingerprint token, if the caller supplied one
    pub if_match: Option<String>,
    /// Wrapped context (resource key, payload, ...)
    pub inner: T,
}

impl<T> Conditional<T> {
    /// Context with no match token
    pub fn unconditional(inner: T) -> Self {
        Self {
            if_match: None,
            inner,
        }
    }

    /// Context asserting `token`
    pub fn expecting(token: impl Into<String>, inner: T) -> Self {
        Self {
            if_match: Some(token.into()),
            inner,
        }
    }
}

impl<T> ConditionalRequest for Conditional<T> {
    fn if_match(&self) -> Option<&str> {
        self.if_match.as_deref()
    }
}
