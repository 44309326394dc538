//! Core types for occgate
//!
//! This module defines the foundational types:
//! - ResourceKey: Opaque identifier of a guarded resource

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a resource owned by a store
///
/// A ResourceKey is a wrapper around the numeric primary key used in the
/// resource URL (`/api/document/<pk>`). The guard treats it as opaque: it is
/// only ever handed back to the store and the fingerprint provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceKey(u64);

impl ResourceKey {
    /// Create a key from a raw primary key
    pub const fn new(pk: u64) -> Self {
        Self(pk)
    }

    /// Get the raw primary key
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ResourceKey {
    fn from(pk: u64) -> Self {
        Self(pk)
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a key from a decimal path segment
///
/// Only ASCII digits are accepted; signs, whitespace and empty input are
/// rejected so that `"+1"` and `"1"` never name the same resource.
impl FromStr for ResourceKey {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(crate::error::Error::InvalidInput(format!(
                "resource key must be decimal digits, got {:?}",
                s
            )));
        }
        s.parse::<u64>().map(Self).map_err(|e| {
            crate::error::Error::InvalidInput(format!("resource key {:?} out of range: {}", s, e))
        })
    }
}
