//! AES-256-CBC encryption and decryption of opaque byte payloads.
//!
//! **Algorithm choice:** AES-256 in CBC mode with PKCS7 padding, a fresh
//! random IV per message. This matches the wire format of the service this
//! crate replaces, so existing envelopes remain decryptable.
//!
//! **There is no authentication tag.** CBC without a MAC detects tampering
//! only when the padding happens to break; a forged ciphertext can decrypt
//! to garbage that still unpads cleanly. Adding an HMAC or switching to an
//! AEAD would change the wire format and is deliberately not done here.

use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use block_modes::{block_padding::Pkcs7, BlockMode, Cbc};
use rand::{rngs::OsRng, RngCore};
use thiserror::Error;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of a CBC initialization vector (one AES block).
pub const IV_LEN: usize = 16;

type Aes256Cbc = Cbc<Aes256, Pkcs7>;

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid key length: expected {KEY_LEN} bytes")]
    InvalidKeyLength,

    /// The block cipher operation failed (wrong key, corrupted ciphertext,
    /// or a PKCS7 padding check failure on decrypt).
    #[error("block cipher operation failed")]
    BlockCipher,
}

/// Errors produced when parsing an encoded envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The envelope text is not valid base64.
    #[error("envelope is not valid base64")]
    NotBase64(#[from] base64::DecodeError),

    /// The decoded envelope is too short to contain an IV.
    #[error("envelope too short to contain an IV: {0} bytes, need {IV_LEN}")]
    Truncated(usize),
}

/// A parsed envelope: per-message IV plus ciphertext.
///
/// The string representation is `base64(iv || ciphertext)` using the standard
/// base64 alphabet with padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Raw IV bytes.
    pub iv: [u8; IV_LEN],
    /// Raw PKCS7-padded ciphertext bytes.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Encode this envelope to its canonical base64 string representation.
    pub fn encode(&self) -> String {
        let mut bytes = Vec::with_capacity(IV_LEN + self.ciphertext.len());
        bytes.extend_from_slice(&self.iv);
        bytes.extend_from_slice(&self.ciphertext);
        STANDARD.encode(bytes)
    }

    /// Parse an encoded envelope string back into an [`Envelope`].
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::NotBase64`] if the text is not valid base64,
    /// or [`EnvelopeError::Truncated`] if fewer than [`IV_LEN`] bytes decode.
    pub fn decode(s: &str) -> Result<Self, EnvelopeError> {
        let bytes = STANDARD.decode(s)?;
        if bytes.len() < IV_LEN {
            return Err(EnvelopeError::Truncated(bytes.len()));
        }
        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&bytes[..IV_LEN]);
        Ok(Self {
            iv,
            ciphertext: bytes[IV_LEN..].to_vec(),
        })
    }
}

/// Generate a random IV via the OS CSPRNG.
pub fn generate_iv() -> [u8; IV_LEN] {
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);
    iv
}

/// Encrypt a plaintext with AES-256-CBC and PKCS7 padding.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
pub fn encrypt_cbc(key: &[u8], iv: &[u8; IV_LEN], plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = build_cipher(key, iv)?;
    Ok(cipher.encrypt_vec(plaintext))
}

/// Decrypt an AES-256-CBC ciphertext and strip PKCS7 padding.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
/// Returns [`CipherError::BlockCipher`] if the ciphertext is not a whole
/// number of blocks or the padding check fails (wrong key or tampered data).
pub fn decrypt_cbc(key: &[u8], iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
    let cipher = build_cipher(key, iv)?;
    cipher
        .decrypt_vec(ciphertext)
        .map_err(|_| CipherError::BlockCipher)
}

fn build_cipher(key: &[u8], iv: &[u8; IV_LEN]) -> Result<Aes256Cbc, CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength);
    }
    Aes256Cbc::new_from_slices(key, iv).map_err(|_| CipherError::InvalidKeyLength)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_key() -> Vec<u8> {
        let mut key = vec![0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        key
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let key = random_key();
        let iv = generate_iv();
        let plaintext = b"{\"field\":\"value\"}";
        let ciphertext = encrypt_cbc(&key, &iv, plaintext).unwrap();
        let decrypted = decrypt_cbc(&key, &iv, &ciphertext).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn ciphertext_is_padded_to_whole_blocks() {
        let key = random_key();
        let iv = generate_iv();
        // 16-byte input gains a full padding block.
        let ciphertext = encrypt_cbc(&key, &iv, &[0u8; 16]).unwrap();
        assert_eq!(ciphertext.len(), 32);
        // Empty input still produces one block.
        let ciphertext = encrypt_cbc(&key, &iv, &[]).unwrap();
        assert_eq!(ciphertext.len(), 16);
    }

    #[test]
    fn wrong_key_fails_decryption() {
        let key1 = random_key();
        let key2 = random_key();
        let iv = generate_iv();
        let ciphertext = encrypt_cbc(&key1, &iv, b"secret").unwrap();
        assert!(decrypt_cbc(&key2, &iv, &ciphertext).is_err());
    }

    #[test]
    fn invalid_key_length_rejected() {
        let short_key = vec![0u8; 16];
        let iv = generate_iv();
        assert!(matches!(
            encrypt_cbc(&short_key, &iv, b"x"),
            Err(CipherError::InvalidKeyLength)
        ));
    }

    #[test]
    fn partial_block_ciphertext_rejected() {
        let key = random_key();
        let iv = generate_iv();
        assert!(matches!(
            decrypt_cbc(&key, &iv, &[0u8; 15]),
            Err(CipherError::BlockCipher)
        ));
    }

    #[test]
    fn envelope_encode_decode_round_trip() {
        let envelope = Envelope {
            iv: [7u8; IV_LEN],
            ciphertext: vec![1, 2, 3, 4],
        };
        let s = envelope.encode();
        let parsed = Envelope::decode(&s).unwrap();
        assert_eq!(parsed, envelope);
    }

    #[test]
    fn decode_rejects_bad_base64() {
        assert!(matches!(
            Envelope::decode("not base64!!!"),
            Err(EnvelopeError::NotBase64(_))
        ));
    }

    #[test]
    fn decode_rejects_envelope_shorter_than_iv() {
        let s = STANDARD.encode([0u8; IV_LEN - 1]);
        assert!(matches!(
            Envelope::decode(&s),
            Err(EnvelopeError::Truncated(15))
        ));
    }

    #[test]
    fn decode_accepts_empty_ciphertext_region() {
        // Exactly IV_LEN bytes: an IV with no ciphertext. Framing accepts it;
        // decryption of the empty region fails later.
        let s = STANDARD.encode([9u8; IV_LEN]);
        let envelope = Envelope::decode(&s).unwrap();
        assert_eq!(envelope.iv, [9u8; IV_LEN]);
        assert!(envelope.ciphertext.is_empty());
    }
}
