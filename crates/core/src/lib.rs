//! Core types and traits for occgate
//!
//! This crate defines the foundational types used throughout the system:
//! - Fingerprint: Strong validator derived from resource content
//! - FingerprintProvider: Injected capability computing a resource's fingerprint
//! - ResourceKey: Opaque resource identifier
//! - Rejection / Error: Error type hierarchy
//! - ResourceStore: Storage collaborator contract
//! - GuardConfig: `occgate.toml` configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod traits;
pub mod types;

pub use config::GuardConfig;
pub use error::{Error, Rejection, Result};
pub use fingerprint::{Fingerprint, FingerprintProvider, Fingerprinted};
pub use traits::ResourceStore;
pub use types::ResourceKey;
