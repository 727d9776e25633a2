//! Typed envelope encryption for serde-serialisable values.
//!
//! [`SealedBoxCodec`] serialises a value to JSON, encrypts it with
//! AES-256-CBC under a per-call random IV, and returns a single base64
//! string framing `iv || ciphertext`. [`SealedBoxCodec::decrypt`] reverses
//! the process into any compatible [`serde::de::DeserializeOwned`] type.
//!
//! The key is supplied once, as the raw UTF-8 bytes of a 32-character
//! configured string, and is never logged.
//!
//! # Security note
//!
//! The envelope carries **no authentication tag** — CBC mode here is
//! unauthenticated, so tampering is only detected when the padding check
//! happens to fail. This preserves wire compatibility with the service this
//! crate replaces; adding a MAC or switching to an AEAD is a format-breaking
//! change and out of scope.
//!
//! # Example
//!
//! ```no_run
//! use sealed_codec::{EncryptionConfig, SealedBoxCodec};
//!
//! # fn main() -> Result<(), sealed_codec::Error> {
//! let config = EncryptionConfig::from_env()?;
//! let codec = SealedBoxCodec::new(&config)?;
//!
//! let envelope = codec.encrypt(&vec!["a", "b"])?;
//! let words: Vec<String> = codec.decrypt(&envelope)?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;

pub use codec::SealedBoxCodec;
pub use config::EncryptionConfig;
pub use crypto::{IV_LEN, KEY_LEN};
pub use error::Error;
