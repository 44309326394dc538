//! Store-backed fingerprint provider
//!
//! The common case: the fingerprint of a resource is the fingerprint of
//! whatever its store currently holds. [`StoreFingerprint`] reads the
//! resource through [`ResourceStore::fingerprint`] on every call, so it never
//! caches a stale validator.

use crate::precondition::Conditional;
use occgate_core::{Error, Fingerprint, FingerprintProvider, ResourceKey, ResourceStore};
use std::sync::Arc;

/// Context that names the resource it targets
pub trait ResourceAddress {
    /// Key of the targeted resource
    fn resource_key(&self) -> ResourceKey;
}

impl ResourceAddress for ResourceKey {
    fn resource_key(&self) -> ResourceKey {
        *self
    }
}

impl<T: ResourceAddress> ResourceAddress for Conditional<T> {
    fn resource_key(&self) -> ResourceKey {
        self.inner.resource_key()
    }
}

/// Fingerprint provider reading live content from a store
pub struct StoreFingerprint<S> {
    store: Arc<S>,
}

impl<S> StoreFingerprint<S> {
    /// Provider over `store`
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> Clone for StoreFingerprint<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S, C> FingerprintProvider<C> for StoreFingerprint<S>
where
    S: ResourceStore,
    C: ResourceAddress + ?Sized,
{
    type Error = Error;

    fn compute(&self, ctx: &C) -> Result<Fingerprint, Error> {
        self.store.fingerprint(&ctx.resource_key())
    }
}
