//! Anonymous-access credential generation.
//!
//! A correspondent who starts a letter receives two self-contained
//! secrets: a short access key they can transcribe by hand and a
//! longer access password. The pair is returned exactly once at
//! issuance; only salted hashes are ever persisted.

use rand::rngs::OsRng;
use rand::{Rng, RngCore};

/// Access key length in characters (uppercase hex).
pub const ACCESS_KEY_LEN: usize = 8;

/// Access password length in characters.
pub const ACCESS_PASSWORD_LEN: usize = 20;

const PASSWORD_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// The plaintext credential pair handed to a correspondent at start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessCredentials {
    /// Short, uppercase, human-transcribable lookup key.
    pub access_key: String,
    /// Longer shared secret verified against a per-record salted hash.
    pub access_password: String,
}

/// Issues a fresh access-key/access-password pair.
///
/// The key is derived from random bytes (hex, uppercased) so it stays
/// transcribable; the password samples a richer upper+digit charset
/// for more entropy. Collisions in the key space are treated as
/// negligible rather than retried.
#[must_use]
pub fn issue_credentials() -> AccessCredentials {
    let mut key_bytes = [0u8; ACCESS_KEY_LEN / 2];
    OsRng.fill_bytes(&mut key_bytes);
    let access_key = hex::encode(key_bytes).to_uppercase();

    let mut rng = OsRng;
    let access_password = (0..ACCESS_PASSWORD_LEN)
        .map(|_| PASSWORD_CHARSET[rng.gen_range(0..PASSWORD_CHARSET.len())] as char)
        .collect();

    AccessCredentials {
        access_key,
        access_password,
    }
}
