//! Content fingerprints (strong validators)
//!
//! A [`Fingerprint`] is an opaque token derived from a resource's content.
//! It carries equality only: two fingerprints are equal iff the content they
//! were computed from was byte-identical. There is no ordering and no notion
//! of "newer"; this is a validator, not a version counter.
//!
//! Format: lowercase hex of SHA-256 over the content bytes (64 characters).

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Opaque strong validator for a resource's content
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of raw content bytes
    pub fn of(content: &[u8]) -> Self {
        Self(format!("{:x}", Sha256::digest(content)))
    }

    /// Wrap an already computed token
    ///
    /// Used by providers that derive validators some other way (for
    /// example, a store that keeps its own digests).
    pub fn from_token(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check a client-supplied token against this fingerprint
    ///
    /// Exact byte equality; no normalisation, no weak comparison.
    pub fn matches(&self, token: &str) -> bool {
        self.0 == token
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content that knows its own canonical byte form
///
/// Implemented by resource content types so a store-backed provider can
/// fingerprint whatever the store hands back.
pub trait Fingerprinted {
    /// Canonical bytes the fingerprint is computed over
    fn fingerprint_bytes(&self) -> Vec<u8>;

    /// Fingerprint of the current content
    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.fingerprint_bytes())
    }
}

impl Fingerprinted for str {
    fn fingerprint_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(self.as_bytes())
    }
}

impl Fingerprinted for String {
    fn fingerprint_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(self.as_bytes())
    }
}

/// Capability: compute the fingerprint of the resource a request targets
///
/// `C` is whatever context identifies the resource (a key, a request, a
/// handler instance). The guard is generic over this trait and never picks a
/// hashing strategy itself.
///
/// Implementations must be pure: same content, same fingerprint, no side
/// effects. The only failure is the resource being unreadable; that error is
/// the collaborator's own and is propagated by the guard untouched.
///
/// Any `Fn(&C) -> Result<Fingerprint, E>` is a provider:
///
/// ```
/// use occgate_core::{Fingerprint, FingerprintProvider};
///
/// let provider = |text: &String| -> Result<Fingerprint, std::convert::Infallible> {
///     Ok(Fingerprint::of(text.as_bytes()))
/// };
/// let fp = provider.compute(&"hello".to_string()).unwrap();
/// assert_eq!(fp, Fingerprint::of(b"hello"));
/// ```
pub trait FingerprintProvider<C: ?Sized> {
    /// Error raised when the resource cannot be read
    type Error;

    /// Compute the fingerprint of the resource identified by `ctx`
    fn compute(&self, ctx: &C) -> Result<Fingerprint, Self::Error>;
}

impl<C, F, E> FingerprintProvider<C> for F
where
    C: ?Sized,
    F: Fn(&C) -> Result<Fingerprint, E>,
{
    type Error = E;

    fn compute(&self, ctx: &C) -> Result<Fingerprint, E> {
        self(ctx)
    }
}
