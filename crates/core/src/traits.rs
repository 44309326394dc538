//! Collaborator contract for resource storage
//!
//! The guard never owns resource state. It reads content to fingerprint it
//! and delegates writes to a store implementing [`ResourceStore`].

use crate::error::Result;
use crate::fingerprint::{Fingerprint, Fingerprinted};
use crate::types::ResourceKey;

/// Resource storage consumed by the guard and its handlers
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync).
///
/// Visibility: a write or successful compare-and-swap must be visible to
/// every subsequent `read` by the time the call returns. The guard computes
/// the post-write fingerprint right after the write handler returns and
/// relies on this.
pub trait ResourceStore: Send + Sync {
    /// Content type held per key
    type Content: Fingerprinted + Clone;

    /// Read the current content of a resource
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no resource exists under `key`.
    fn read(&self, key: &ResourceKey) -> Result<Self::Content>;

    /// Replace the content of an existing resource unconditionally
    ///
    /// Returns the content as stored.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no resource exists under `key`.
    fn write(&self, key: &ResourceKey, content: Self::Content) -> Result<Self::Content>;

    /// Replace the content only if its fingerprint still equals `expected`
    ///
    /// Comparison and replacement happen atomically with respect to every
    /// other write on the same key. Returns the content as stored.
    ///
    /// # Errors
    ///
    /// - `Error::NotFound` if no resource exists under `key`
    /// - `Error::Rejected(Rejection::PreconditionFailed)` if the fingerprint
    ///   changed; nothing is written
    fn compare_and_swap(
        &self,
        key: &ResourceKey,
        expected: &str,
        content: Self::Content,
    ) -> Result<Self::Content>;

    /// Fingerprint of the resource's current content
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no resource exists under `key`.
    fn fingerprint(&self, key: &ResourceKey) -> Result<Fingerprint> {
        Ok(self.read(key)?.fingerprint())
    }
}
