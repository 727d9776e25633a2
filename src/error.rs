//! Public error type for the codec.

use thiserror::Error;

use crate::crypto::cipher::{CipherError, EnvelopeError};

/// Top-level codec error type.
///
/// Every failure maps to exactly one variant; nothing is retried or recovered
/// internally, and the caller owns any retry policy.
#[derive(Debug, Error)]
pub enum Error {
    /// The key is missing, empty, or the wrong length.
    #[error("encryption configuration error: {0}")]
    Configuration(String),

    /// The payload could not be serialised to JSON.
    #[error("payload serialisation failed")]
    Serialization(#[source] serde_json::Error),

    /// The cipher operation failed during encryption.
    #[error("encryption failed")]
    Encryption(#[source] CipherError),

    /// The envelope is not valid base64 or is too short to contain an IV.
    #[error("malformed envelope")]
    MalformedEnvelope(#[source] EnvelopeError),

    /// The cipher operation failed during decryption (wrong key, corrupted
    /// ciphertext, or padding check failure).
    #[error("decryption failed")]
    Decryption(#[source] CipherError),

    /// The decrypted bytes do not parse as JSON or do not match the shape of
    /// the requested type.
    #[error("payload deserialisation failed")]
    Deserialization(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_generic() {
        // Error messages at this level must not carry payload fragments.
        let e = Error::Configuration("key must be 32 bytes".into());
        assert!(e.to_string().contains("configuration"));

        let e = Error::Decryption(CipherError::BlockCipher);
        assert_eq!(e.to_string(), "decryption failed");
    }

    #[test]
    fn source_chain_is_preserved() {
        use std::error::Error as _;
        let e = Error::MalformedEnvelope(EnvelopeError::Truncated(3));
        assert!(e.source().unwrap().to_string().contains("too short"));
    }
}
