//! In-memory resource store
//!
//! # Design
//!
//! - DashMap: sharded map, reads only take the shard read lock
//! - Writes hold the entry's shard write lock for the whole
//!   compare-and-replace, so `compare_and_swap` is atomic per key
//! - A write is visible to every later `read` once the call returns
//!
//! Persistence is out of scope; this is the store the document endpoint and
//! the tests run against.

use dashmap::DashMap;
use occgate_core::{Error, Fingerprinted, Rejection, ResourceKey, ResourceStore, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

use crate::document::Document;

/// Store of documents keyed by primary key
pub type DocumentStore = InMemoryStore<Document>;

/// Thread-safe in-memory store
///
/// # Example
///
/// ```
/// use occgate_core::{ResourceKey, ResourceStore};
/// use occgate_storage::{Document, DocumentStore};
///
/// let store = DocumentStore::new();
/// let key = ResourceKey::new(1);
/// store.insert(key, Document::new("hello"));
/// assert_eq!(store.read(&key).unwrap().text, "hello");
/// ```
pub struct InMemoryStore<C> {
    entries: DashMap<ResourceKey, C>,
    /// Number of successful writes (including CAS) since creation
    writes: AtomicU64,
}

impl<C> InMemoryStore<C> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            writes: AtomicU64::new(0),
        }
    }

    /// Create or overwrite a resource outside the guarded write path
    ///
    /// Returns the previous content if there was one. Not counted as a write.
    pub fn insert(&self, key: ResourceKey, content: C) -> Option<C> {
        self.entries.insert(key, content)
    }

    /// Remove a resource
    pub fn remove(&self, key: &ResourceKey) -> Option<C> {
        self.entries.remove(key).map(|(_, c)| c)
    }

    /// Check if a resource exists
    pub fn contains(&self, key: &ResourceKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of resources
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of applied writes
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Acquire)
    }
}

impl<C> Default for InMemoryStore<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ResourceStore for InMemoryStore<C>
where
    C: Fingerprinted + Clone + Send + Sync,
{
    type Content = C;

    fn read(&self, key: &ResourceKey) -> Result<C> {
        self.entries
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or(Error::NotFound(*key))
    }

    fn write(&self, key: &ResourceKey, content: C) -> Result<C> {
        let mut entry = self.entries.get_mut(key).ok_or(Error::NotFound(*key))?;
        *entry = content.clone();
        self.writes.fetch_add(1, Ordering::AcqRel);
        trace!(target: "occgate::storage", key = %key, "write applied");
        Ok(content)
    }

    fn compare_and_swap(&self, key: &ResourceKey, expected: &str, content: C) -> Result<C> {
        // get_mut holds the shard write lock until `entry` drops
        let mut entry = self.entries.get_mut(key).ok_or(Error::NotFound(*key))?;
        let current = entry.fingerprint();
        if !current.matches(expected) {
            trace!(target: "occgate::storage", key = %key, "compare_and_swap lost");
            return Err(Rejection::PreconditionFailed {
                provided: expected.to_string(),
                current,
            }
            .into());
        }
        *entry = content.clone();
        self.writes.fetch_add(1, Ordering::AcqRel);
        trace!(target: "occgate::storage", key = %key, "compare_and_swap applied");
        Ok(content)
    }
}
