//! Salted hashing contract tests.

use lantern_crypto::{generate_salt, hash_secret, hash_with_salt, verify_secret};

// ── Determinism ──

#[test]
fn same_secret_same_salt_same_hash() {
    let salt = generate_salt();
    assert_eq!(hash_with_salt("TOPSECRET", &salt), hash_with_salt("TOPSECRET", &salt));
}

#[test]
fn same_secret_different_salt_different_hash() {
    assert_ne!(
        hash_with_salt("TOPSECRET", &generate_salt()),
        hash_with_salt("TOPSECRET", &generate_salt())
    );
}

#[test]
fn hash_secret_generates_fresh_salt() {
    let a = hash_secret("TOPSECRET");
    let b = hash_secret("TOPSECRET");
    assert_ne!(a.salt, b.salt);
    assert_ne!(a.hash, b.hash);
}

#[test]
fn hash_is_hex_encoded_sha256_width() {
    let hashed = hash_secret("anything");
    assert_eq!(hashed.hash.len(), 64);
    assert!(hashed.hash.chars().all(|c| c.is_ascii_hexdigit()));
}

// ── Verification ──

#[test]
fn verify_accepts_correct_secret() {
    let hashed = hash_secret("XK9QWERTY0");
    assert!(verify_secret("XK9QWERTY0", &hashed.salt, &hashed.hash));
}

#[test]
fn verify_rejects_wrong_secret() {
    let hashed = hash_secret("XK9QWERTY0");
    assert!(!verify_secret("XK9QWERTY1", &hashed.salt, &hashed.hash));
}

#[test]
fn verify_rejects_wrong_salt() {
    let hashed = hash_secret("XK9QWERTY0");
    assert!(!verify_secret("XK9QWERTY0", &generate_salt(), &hashed.hash));
}

#[test]
fn verify_rejects_empty_secret_against_real_hash() {
    let hashed = hash_secret("XK9QWERTY0");
    assert!(!verify_secret("", &hashed.salt, &hashed.hash));
}

// ── Malformed input never errors ──

#[test]
fn malformed_stored_hash_is_a_mismatch_not_a_panic() {
    let salt = generate_salt();
    assert!(!verify_secret("secret", &salt, "not-hex-at-all"));
    assert!(!verify_secret("secret", &salt, ""));
    assert!(!verify_secret("secret", &salt, "abc")); // odd length
}

#[test]
fn unusual_salts_still_hash() {
    // Any byte string keys the MAC; nothing here can fail.
    let digest = hash_with_salt("secret", "");
    assert_eq!(digest.len(), 64);
    let digest = hash_with_salt("secret", "salt with spaces and ünïcode");
    assert_eq!(digest.len(), 64);
}
