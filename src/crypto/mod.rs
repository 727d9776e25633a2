//! AES-256-CBC encryption primitives and envelope framing.
//!
//! This module is intentionally free of serde and configuration dependencies.
//! It provides the low-level encrypt/decrypt operations used by the codec layer.
//!
//! # Envelope format
//!
//! ```text
//! base64(iv || ciphertext)
//! ```
//!
//! The first [`cipher::IV_LEN`] decoded bytes are the IV; the remainder is the
//! PKCS7-padded ciphertext. There is no version tag and no authentication tag.

pub mod cipher;

pub use cipher::{IV_LEN, KEY_LEN};
