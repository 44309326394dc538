//! Concurrency layer for occgate
//!
//! This crate implements the optimistic concurrency control (OCC) protocol
//! for resource endpoints:
//! - Precondition: the client's If-Match assertion and its validation
//! - ConcurrencyGuard: read/write wrapping with fingerprint attachment
//! - StoreFingerprint: provider reading live content from a store
//!
//! The guard detects stale client views. It does not lock; preventing two
//! writers from racing inside the store is the store's job (compare-and-swap).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod guard;
pub mod precondition;
pub mod provider;

pub use guard::{ConcurrencyGuard, Handler, Tagged};
pub use precondition::{check_token, Conditional, ConditionalRequest, Precondition};
pub use provider::{ResourceAddress, StoreFingerprint};
