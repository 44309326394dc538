//! Document content: a single text field
//!
//! The wire form is the JSON object `{"text": "..."}`. The fingerprint covers
//! the UTF-8 bytes of `text` and nothing else, so two documents with the same
//! text always share a validator.

use occgate_core::Fingerprinted;
use serde::{Deserialize, Serialize};

/// A text document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document body
    pub text: String,
}

impl Document {
    /// Create a document
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Fingerprinted for Document {
    fn fingerprint_bytes(&self) -> Vec<u8> {
        self.text.as_bytes().to_vec()
    }

    fn fingerprint(&self) -> occgate_core::Fingerprint {
        occgate_core::Fingerprint::of(self.text.as_bytes())
    }
}
