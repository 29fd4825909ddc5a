//! Cryptographic primitives for Lantern.
//!
//! Provides the three building blocks the correspondence core needs:
//! - HMAC-SHA256 salted hashing for access-key lookup and
//!   access-password verification
//! - XChaCha20-Poly1305 content encryption with a fresh random nonce
//!   per record field
//! - Generation of the anonymous access-key/access-password pair
//!
//! # Architecture
//!
//! Letter content is sealed with a single process-wide [`ContentKey`]
//! loaded from configuration at startup. The credentials that gate a
//! letter are never stored in plaintext: the access key is hashed with
//! a deployment-wide lookup salt (so the hash is an index), while the
//! access password is hashed with a salt generated per record. Both
//! hashes use the same keyed one-way function from [`hasher`].

mod cipher;
mod credentials;
mod error;
pub mod hasher;

pub use cipher::{ContentCipher, ContentKey, SealedText, CONTENT_KEY_SIZE, NONCE_SIZE};
pub use credentials::{issue_credentials, AccessCredentials, ACCESS_KEY_LEN, ACCESS_PASSWORD_LEN};
pub use error::{CryptoError, CryptoResult};
pub use hasher::{generate_salt, hash_secret, hash_with_salt, verify_secret, SaltedHash};
