//! Tests for private key encryption.

use std::sync::Mutex;

use antelope_primitives::{KeyType, PrivateKey};

use crate::encrypted_key::EncryptedPrivateKey;
use crate::security_level::SecurityLevel;
use crate::KeyEncryptionError;

const PRIVATE_KEY: &str = "PVT_K1_zVFeDTSxD6KDCjQomkzZMdB5AiaR3EnCZLrxmsx5tDzH937km";

/// Password bytes for the words `pepper craft chat march slim exchange`.
const PASSWORD_HEX: &str = "028b99026d0fb2f275";

/// Cheapest level the format allows, N = 4096, r = 1.
const FAST: SecurityLevel = SecurityLevel { n: 4096, r: 1, p: 1 };

const FAST_DATA_HEX: &str =
    "007c22c2e0e55eca5c30cfe1c33d70e172845f72cf844760483a2657e017137d81fcff025e";
const FAST_STRING: &str = "SEC_K1_17Ak8ndMsuhA1XfHXcwvja63C5Wf3hWRwJWB79CpdivBfaUp6GcbjWMC";

const PUBLISHED_STRING: &str = "SEC_K1_G28QZY99rSND9TEpXjKWQVfwVFDhrew1u7ZQaTjW5PuvYCFgoWs7ojTE";
const PUBLISHED_BYTES_HEX: &str =
    "00447c22c2e0d92bd8ca0542275a02f0e05fbf82109cfda52f5ca04e5cb46e4bcba496ce54be";

fn password() -> Vec<u8> {
    hex::decode(PASSWORD_HEX).unwrap()
}

fn private_key() -> PrivateKey {
    PRIVATE_KEY.parse().unwrap()
}

// ---- known answers ----

#[tokio::test]
async fn test_encrypt_known_answer() {
    let encrypted = EncryptedPrivateKey::encrypt(&private_key(), &password(), None, Some(FAST))
        .await
        .unwrap();
    assert_eq!(hex::encode(encrypted.data()), FAST_DATA_HEX);
    assert_eq!(encrypted.to_string(), FAST_STRING);
}

#[tokio::test]
async fn test_decrypt_known_answer() {
    let encrypted: EncryptedPrivateKey = FAST_STRING.parse().unwrap();
    assert_eq!(encrypted.security_level(), FAST);
    let key = encrypted.decrypt(&password(), None).await.unwrap();
    assert_eq!(key.to_string(), PRIVATE_KEY);
}

#[tokio::test]
async fn test_encrypt_published_key() {
    let encrypted = EncryptedPrivateKey::encrypt(
        &private_key(),
        &password(),
        None,
        Some(SecurityLevel::MEDIUM),
    )
    .await
    .unwrap();
    assert_eq!(encrypted.to_string(), PUBLISHED_STRING);
}

#[tokio::test]
async fn test_decrypt_published_key() {
    let encrypted: EncryptedPrivateKey = PUBLISHED_STRING.parse().unwrap();
    let key = encrypted.decrypt(&password(), None).await.unwrap();
    assert_eq!(key.to_string(), PRIVATE_KEY);
    assert_eq!(key.to_wif(), "5JomqKfYXQn5aDb1T1Df5c6kPfzdnYuKW1d868pdBxjs9quS1xE");

    // `this sing wage gym deer oak`
    let other = hex::decode("038364af62d00e54be").unwrap();
    assert!(matches!(
        encrypted.decrypt(&other, None).await,
        Err(KeyEncryptionError::InvalidPassword)
    ));
}

#[test]
fn test_published_key_layout() {
    let encrypted: EncryptedPrivateKey = PUBLISHED_STRING.parse().unwrap();
    assert_eq!(encrypted.key_type(), KeyType::K1);
    assert_eq!(encrypted.security_level(), SecurityLevel::MEDIUM);
    assert_eq!(hex::encode(encrypted.to_bytes()), PUBLISHED_BYTES_HEX);
    assert_eq!(encrypted.to_string(), PUBLISHED_STRING);

    // the checksum depends only on the public key
    let fast: EncryptedPrivateKey = FAST_STRING.parse().unwrap();
    assert_eq!(encrypted.checksum(), fast.checksum());
    assert_eq!(hex::encode(encrypted.checksum()), "7c22c2e0");
}

// ---- failures ----

#[tokio::test]
async fn test_wrong_password() {
    let encrypted: EncryptedPrivateKey = FAST_STRING.parse().unwrap();
    let result = encrypted.decrypt(b"not the password", None).await;
    assert!(matches!(result, Err(KeyEncryptionError::InvalidPassword)));
}

#[tokio::test]
async fn test_invalid_security_level() {
    let level = SecurityLevel { n: 4096, r: 1, p: 2 };
    let result = EncryptedPrivateKey::encrypt(&private_key(), b"pw", None, Some(level)).await;
    assert!(matches!(result, Err(KeyEncryptionError::InvalidSecurityLevel(_))));
}

#[test]
fn test_parse_failures() {
    assert!(EncryptedPrivateKey::from_string("PVT_K1_abc").is_err());
    assert!(matches!(
        EncryptedPrivateKey::from_string(&PUBLISHED_STRING.replace("SEC_K1_", "SEC_R1_")),
        Err(KeyEncryptionError::UnsupportedKeyType(KeyType::R1))
    ));
    // last character changed
    let mut tampered = PUBLISHED_STRING.to_string();
    tampered.pop();
    tampered.push('F');
    assert!(EncryptedPrivateKey::from_string(&tampered).is_err());

    assert!(matches!(
        EncryptedPrivateKey::from_parts(KeyType::K1, &[0u8; 36]),
        Err(KeyEncryptionError::InvalidEncryptedKey(_))
    ));
    assert!(matches!(
        EncryptedPrivateKey::from_parts(KeyType::WA, &[0u8; 37]),
        Err(KeyEncryptionError::UnsupportedKeyType(KeyType::WA))
    ));
}

#[test]
fn test_binary_rejects_other_key_types() {
    let mut bytes = hex::decode(PUBLISHED_BYTES_HEX).unwrap();
    bytes[0] = 1;
    assert!(EncryptedPrivateKey::from_bytes(&bytes).is_err());
    bytes[0] = 0;
    bytes.push(0);
    assert!(EncryptedPrivateKey::from_bytes(&bytes).is_err());
}

// ---- progress and serde ----

#[tokio::test]
async fn test_progress_reported() {
    let seen = Mutex::new(Vec::new());
    let report = |p: f64| seen.lock().unwrap().push(p);
    let encrypted =
        EncryptedPrivateKey::encrypt(&private_key(), &password(), Some(&report), Some(FAST))
            .await
            .unwrap();
    encrypted.decrypt(&password(), Some(&report)).await.unwrap();
    let seen = seen.into_inner().unwrap();
    assert_eq!(seen, vec![0.0, 1.0, 0.0, 1.0]);
    assert!(seen.iter().all(|p| (0.0..=1.0).contains(p)));
}

#[test]
fn test_serde_string_form() {
    let encrypted: EncryptedPrivateKey = PUBLISHED_STRING.parse().unwrap();
    let json = serde_json::to_string(&encrypted).unwrap();
    assert_eq!(json, format!("\"{}\"", PUBLISHED_STRING));
    let back: EncryptedPrivateKey = serde_json::from_str(&json).unwrap();
    assert_eq!(back, encrypted);
}
