//! Document endpoint routing: `/api/document/<pk>`

use occgate_core::ResourceKey;

/// Path prefix of the document endpoint
pub const DOCUMENT_PREFIX: &str = "/api/document/";

/// Key addressed by a document path
///
/// `pk` is one or more ASCII digits, optionally followed by a single `/`.
/// Anything else is not a document path.
pub fn document_key(path: &str) -> Option<ResourceKey> {
    let rest = path.strip_prefix(DOCUMENT_PREFIX)?;
    let pk = rest.strip_suffix('/').unwrap_or(rest);
    pk.parse().ok()
}

/// Path of the document with `key`
pub fn document_path(key: ResourceKey) -> String {
    format!("{}{}", DOCUMENT_PREFIX, key)
}
