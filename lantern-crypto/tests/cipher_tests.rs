//! Content cipher contract tests.

use lantern_crypto::{ContentCipher, ContentKey, CryptoError, NONCE_SIZE};
use proptest::prelude::*;

fn test_cipher() -> ContentCipher {
    ContentCipher::new(&ContentKey::from_bytes([7u8; 32]))
}

// ── Roundtrip ──

#[test]
fn encrypt_decrypt_roundtrip() {
    let cipher = test_cipher();
    let sealed = cipher.encrypt("a letter to the helpline").unwrap().unwrap();
    assert_eq!(cipher.decrypt(&sealed).unwrap(), "a letter to the helpline");
}

#[test]
fn roundtrip_preserves_unicode() {
    let cipher = test_cipher();
    let text = "kiitos avusta — спасибо — ありがとう";
    let sealed = cipher.encrypt(text).unwrap().unwrap();
    assert_eq!(cipher.decrypt(&sealed).unwrap(), text);
}

proptest! {
    #[test]
    fn roundtrip_arbitrary_text(text in ".{1,200}") {
        let cipher = test_cipher();
        let sealed = cipher.encrypt(&text).unwrap().unwrap();
        prop_assert_eq!(cipher.decrypt(&sealed).unwrap(), text);
    }
}

// ── Fresh nonce per call ──

#[test]
fn same_plaintext_encrypts_differently() {
    let cipher = test_cipher();
    let a = cipher.encrypt("identical").unwrap().unwrap();
    let b = cipher.encrypt("identical").unwrap().unwrap();
    assert_ne!(a.nonce, b.nonce);
    assert_ne!(a.ciphertext, b.ciphertext);
}

#[test]
fn nonce_has_expected_width() {
    let cipher = test_cipher();
    let sealed = cipher.encrypt("x").unwrap().unwrap();
    assert_eq!(sealed.nonce.len(), NONCE_SIZE);
}

// ── Empty input short-circuits ──

#[test]
fn empty_plaintext_yields_none() {
    let cipher = test_cipher();
    assert!(cipher.encrypt("").unwrap().is_none());
}

// ── Failure modes ──

#[test]
fn tampered_ciphertext_fails_decryption() {
    let cipher = test_cipher();
    let mut sealed = cipher.encrypt("do not touch").unwrap().unwrap();
    sealed.ciphertext[0] ^= 0x01;
    assert!(matches!(cipher.decrypt(&sealed), Err(CryptoError::Decryption(_))));
}

#[test]
fn wrong_key_fails_decryption() {
    let sealed = test_cipher().encrypt("sealed under key A").unwrap().unwrap();
    let other = ContentCipher::new(&ContentKey::from_bytes([8u8; 32]));
    assert!(matches!(other.decrypt(&sealed), Err(CryptoError::Decryption(_))));
}

// ── Key parsing ──

#[test]
fn key_from_hex_roundtrip() {
    let key = ContentKey::from_hex(&"ab".repeat(32)).unwrap();
    let cipher = ContentCipher::new(&key);
    let sealed = cipher.encrypt("configured key works").unwrap().unwrap();
    assert_eq!(cipher.decrypt(&sealed).unwrap(), "configured key works");
}

#[test]
fn key_from_hex_rejects_wrong_length() {
    assert!(matches!(
        ContentKey::from_hex("abcd"),
        Err(CryptoError::InvalidKeyLength { expected: 32, actual: 2 })
    ));
}

#[test]
fn key_from_hex_rejects_non_hex() {
    assert!(matches!(
        ContentKey::from_hex("zz"),
        Err(CryptoError::InvalidKeyEncoding(_))
    ));
}
