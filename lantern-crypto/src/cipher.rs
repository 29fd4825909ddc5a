//! Content encryption for letter text.
//!
//! XChaCha20-Poly1305 with a single process-wide key and a fresh
//! random 24-byte nonce per encryption. Nonce and ciphertext are
//! stored side by side; the nonce is never derived from content, so
//! encrypting the same plaintext twice yields different ciphertext.

use crate::error::{CryptoError, CryptoResult};
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Content key size in bytes.
pub const CONTENT_KEY_SIZE: usize = 32;

/// Nonce size in bytes (XChaCha20).
pub const NONCE_SIZE: usize = 24;

/// Process-wide symmetric key for letter content.
///
/// Loaded once from configuration at startup and zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ContentKey([u8; CONTENT_KEY_SIZE]);

impl ContentKey {
    /// Builds a key from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; CONTENT_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parses a key from its hex configuration form.
    pub fn from_hex(hex_str: &str) -> CryptoResult<Self> {
        let bytes =
            hex::decode(hex_str).map_err(|e| CryptoError::InvalidKeyEncoding(e.to_string()))?;
        let len = bytes.len();
        let array: [u8; CONTENT_KEY_SIZE] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: CONTENT_KEY_SIZE,
                    actual: len,
                })?;
        Ok(Self(array))
    }
}

/// Ciphertext plus the nonce that sealed it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedText {
    pub ciphertext: Vec<u8>,
    /// XChaCha20 nonce (24 bytes), generated fresh per encryption.
    pub nonce: [u8; NONCE_SIZE],
}

/// Authenticated encryption of free-text content.
///
/// Immutable for the process lifetime; construct once at startup from
/// the configured [`ContentKey`] and share by reference.
pub struct ContentCipher {
    cipher: XChaCha20Poly1305,
}

impl ContentCipher {
    #[must_use]
    pub fn new(key: &ContentKey) -> Self {
        Self {
            cipher: XChaCha20Poly1305::new(Key::from_slice(&key.0)),
        }
    }

    /// Encrypts a plaintext string under a fresh random nonce.
    ///
    /// Empty input short-circuits to `None` without invoking the
    /// cipher; letter title and content are optional fields.
    pub fn encrypt(&self, plaintext: &str) -> CryptoResult<Option<SealedText>> {
        if plaintext.is_empty() {
            return Ok(None);
        }

        let mut nonce = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce);

        let ciphertext = self
            .cipher
            .encrypt(XNonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|e| CryptoError::Encryption(format!("content seal failed: {e}")))?;

        Ok(Some(SealedText { ciphertext, nonce }))
    }

    /// Decrypts previously sealed text.
    ///
    /// Fails on authentication mismatch (wrong key or tampered data).
    pub fn decrypt(&self, sealed: &SealedText) -> CryptoResult<String> {
        let plaintext = self
            .cipher
            .decrypt(XNonce::from_slice(&sealed.nonce), sealed.ciphertext.as_ref())
            .map_err(|_| {
                CryptoError::Decryption("content open failed (wrong key or tampered data)".into())
            })?;

        String::from_utf8(plaintext)
            .map_err(|e| CryptoError::Decryption(format!("content is not valid UTF-8: {e}")))
    }
}
