//! Configuration loading and validation for the codec.
//!
//! The key is read from the environment at startup. Construction fails with a
//! clear error message if the key is missing, empty, or the wrong length.

use std::fmt;

use serde::Deserialize;

use crate::crypto::KEY_LEN;
use crate::error::Error;

/// Validated encryption configuration.
///
/// The key is the raw UTF-8 text of the configured string, used directly as
/// AES-256 key material (no derivation step). It must therefore be exactly
/// [`KEY_LEN`] bytes long.
#[derive(Clone, Deserialize)]
pub struct EncryptionConfig {
    /// Symmetric key string. **Required.** Must be [`KEY_LEN`] UTF-8 bytes.
    pub key: String,
}

impl EncryptionConfig {
    /// Load and validate configuration from environment variables.
    ///
    /// Reads `ENCRYPTION_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the variable is absent, empty, or
    /// not [`KEY_LEN`] bytes long.
    pub fn from_env() -> Result<Self, Error> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("ENCRYPTION"))
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        let c: EncryptionConfig = cfg
            .try_deserialize()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        c.validate()?;
        Ok(c)
    }

    /// Validate the key, returning a descriptive error on failure.
    pub fn validate(&self) -> Result<(), Error> {
        if self.key.trim().is_empty() {
            return Err(Error::Configuration(
                "ENCRYPTION_KEY is required and must not be empty".into(),
            ));
        }
        let len = self.key.as_bytes().len();
        if len != KEY_LEN {
            return Err(Error::Configuration(format!(
                "ENCRYPTION_KEY must be {KEY_LEN} bytes, got {len}"
            )));
        }
        Ok(())
    }
}

// Key material must never appear in logs or debug output.
impl fmt::Debug for EncryptionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionConfig")
            .field("key", &"<redacted>")
            .finish()
    }
}
