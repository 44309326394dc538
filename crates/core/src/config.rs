//! Guard configuration via `occgate.toml`
//!
//! A plain config file, no builder. On first use a commented default file
//! can be written with [`GuardConfig::write_default_if_missing`].

use crate::error::{Error, Result};
use crate::fingerprint::Fingerprint;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "occgate.toml";

/// 403 Forbidden: status for writes without `If-Match`
pub const STATUS_FORBIDDEN: u16 = 403;

/// 428 Precondition Required (RFC 6585)
pub const STATUS_PRECONDITION_REQUIRED: u16 = 428;

/// Guard configuration loaded from `occgate.toml`.
///
/// # Example
///
/// ```toml
/// # Status for writes without If-Match: 403 (default) or 428
/// missing_precondition_status = 403
///
/// # Emit ETags as "<hex>" instead of bare <hex>
/// quote_etag = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// HTTP status returned when a mutating request has no `If-Match`.
    #[serde(default = "default_missing_precondition_status")]
    pub missing_precondition_status: u16,
    /// Wrap the ETag in double quotes (RFC 9110 entity-tag syntax).
    ///
    /// Clients echo the header verbatim, so `If-Match` must then carry the
    /// quoted form too.
    #[serde(default)]
    pub quote_etag: bool,
}

fn default_missing_precondition_status() -> u16 {
    STATUS_FORBIDDEN
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            missing_precondition_status: default_missing_precondition_status(),
            quote_etag: false,
        }
    }
}

impl GuardConfig {
    /// Check that every value is supported.
    ///
    /// # Errors
    ///
    /// Returns an error if `missing_precondition_status` is not 403 or 428.
    pub fn validate(&self) -> Result<()> {
        match self.missing_precondition_status {
            STATUS_FORBIDDEN | STATUS_PRECONDITION_REQUIRED => Ok(()),
            other => Err(Error::InvalidInput(format!(
                "Invalid missing_precondition_status {} in {}. Expected 403 or 428.",
                other, CONFIG_FILE_NAME
            ))),
        }
    }

    /// Render a fingerprint the way it is sent in `ETag` and expected back in `If-Match`.
    pub fn etag_value(&self, fingerprint: &Fingerprint) -> String {
        if self.quote_etag {
            format!("\"{}\"", fingerprint.as_str())
        } else {
            fingerprint.as_str().to_string()
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# occgate configuration
#
# HTTP status for a mutating request that carries no If-Match header:
#   403 = Forbidden (default)
#   428 = Precondition Required (RFC 6585)
missing_precondition_status = 403

# Emit ETag values wrapped in double quotes (default: false).
# Clients must echo the exact ETag value in If-Match either way.
quote_etag = false
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| match e {
            Error::InvalidInput(msg) => {
                Error::InvalidInput(format!("{} (in '{}')", msg, path.display()))
            }
            other => other,
        })
    }

    /// Parse and validate config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: GuardConfig = toml::from_str(content)
            .map_err(|e| Error::InvalidInput(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::SerializationError(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
