//! Salted one-way hashing for anonymous-access credentials.
//!
//! The hash is HMAC-SHA256 keyed by the salt, hex-encoded. A lookup
//! hash recomputed with a shared deployment salt is stable enough to
//! index on; a verification hash recomputed with a per-record salt is
//! compared in constant time via the MAC itself.

use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Bytes of entropy behind a generated salt (hex-encodes to 64 chars).
pub const SALT_BYTES: usize = 32;

/// A hash together with the salt that keyed it.
///
/// The salt must be stored alongside the hash; the hash is meaningless
/// without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaltedHash {
    pub hash: String,
    pub salt: String,
}

/// Generates a fresh high-entropy salt, hex-encoded.
#[must_use]
pub fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hashes a secret with a caller-provided salt.
///
/// Deterministic: the same secret and salt always produce the same
/// hex digest. Any byte string is a valid salt; a malformed input
/// cannot make this fail, it only produces a digest that will not
/// match anything.
#[must_use]
pub fn hash_with_salt(secret: &str, salt: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(salt.as_bytes()).expect("HMAC can take key of any size");
    mac.update(secret.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Hashes a secret with a freshly generated salt.
#[must_use]
pub fn hash_secret(secret: &str) -> SaltedHash {
    let salt = generate_salt();
    let hash = hash_with_salt(secret, &salt);
    SaltedHash { hash, salt }
}

/// Verifies a secret against a stored salt and hex digest.
///
/// Comparison happens in constant time through [`Mac::verify_slice`].
/// A stored digest that does not decode as hex is treated as a
/// mismatch, never an error.
#[must_use]
pub fn verify_secret(secret: &str, salt: &str, expected_hex: &str) -> bool {
    let Ok(expected) = hex::decode(expected_hex) else {
        return false;
    };
    let mut mac =
        HmacSha256::new_from_slice(salt.as_bytes()).expect("HMAC can take key of any size");
    mac.update(secret.as_bytes());
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_salt_is_64_hex_chars() {
        let salt = generate_salt();
        assert_eq!(salt.len(), SALT_BYTES * 2);
        assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn two_salts_differ() {
        assert_ne!(generate_salt(), generate_salt());
    }
}
