//! Storage layer for occgate
//!
//! This crate provides the resource store the guard delegates to:
//! - Document: single-field text content with its fingerprint
//! - InMemoryStore: DashMap-backed store with atomic compare-and-swap

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod memory;

pub use document::Document;
pub use memory::{DocumentStore, InMemoryStore};
