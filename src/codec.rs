//! Typed envelope encryption: JSON-serialise, encrypt, base64-frame.

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

use crate::config::EncryptionConfig;
use crate::crypto::cipher::{self, Envelope, KEY_LEN};
use crate::error::Error;

/// Encrypts serde-serialisable values into self-contained base64 envelopes
/// and decrypts them back into typed values.
///
/// The codec holds only the immutable key; every call generates its own IV
/// and cipher instance, so a single codec is safe to share across threads.
#[derive(Clone)]
pub struct SealedBoxCodec {
    key: [u8; KEY_LEN],
}

impl SealedBoxCodec {
    /// Build a codec from a validated [`EncryptionConfig`].
    ///
    /// The key is the raw UTF-8 bytes of the configured string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the key is not [`KEY_LEN`] bytes.
    pub fn new(config: &EncryptionConfig) -> Result<Self, Error> {
        config.validate()?;
        let bytes = config.key.as_bytes();
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(bytes);
        Ok(Self { key })
    }

    /// Build a codec directly from raw key bytes.
    pub fn from_key(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Encrypt a value into a base64 envelope string.
    ///
    /// The value is serialised to JSON, encrypted with AES-256-CBC under a
    /// fresh random IV, and framed as `base64(iv || ciphertext)`. Two calls
    /// on the same value produce different envelopes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the value cannot be serialised,
    /// or [`Error::Encryption`] if the cipher operation fails. Failures are
    /// logged once at error level with a generic message.
    pub fn encrypt<T: Serialize>(&self, value: &T) -> Result<String, Error> {
        self.encrypt_inner(value).inspect_err(|_| {
            error!("encryption failed");
        })
    }

    fn encrypt_inner<T: Serialize>(&self, value: &T) -> Result<String, Error> {
        let json = serde_json::to_vec(value).map_err(Error::Serialization)?;
        let iv = cipher::generate_iv();
        let ciphertext = cipher::encrypt_cbc(&self.key, &iv, &json).map_err(Error::Encryption)?;
        Ok(Envelope { iv, ciphertext }.encode())
    }

    /// Decrypt a base64 envelope string back into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedEnvelope`] if the text is not valid base64
    /// or is too short to contain an IV, [`Error::Decryption`] if the cipher
    /// operation fails (wrong key, corrupted ciphertext, padding failure),
    /// or [`Error::Deserialization`] if the plaintext does not parse into
    /// `T`. Failures are logged once at error level with a generic message;
    /// the log never includes the key, IV, or plaintext.
    pub fn decrypt<T: DeserializeOwned>(&self, envelope: &str) -> Result<T, Error> {
        self.decrypt_inner(envelope).inspect_err(|_| {
            error!("decryption failed");
        })
    }

    fn decrypt_inner<T: DeserializeOwned>(&self, envelope: &str) -> Result<T, Error> {
        let envelope = Envelope::decode(envelope).map_err(Error::MalformedEnvelope)?;
        let plaintext = cipher::decrypt_cbc(&self.key, &envelope.iv, &envelope.ciphertext)
            .map_err(Error::Decryption)?;
        serde_json::from_slice(&plaintext).map_err(Error::Deserialization)
    }
}

// Key material must never appear in logs or debug output.
impl fmt::Debug for SealedBoxCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealedBoxCodec")
            .field("key", &"<redacted>")
            .finish()
    }
}
