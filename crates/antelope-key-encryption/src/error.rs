//! Error types for key encryption.

use antelope_primitives::KeyType;

/// Errors that can occur while encrypting or decrypting a private key.
#[derive(Debug, thiserror::Error)]
pub enum KeyEncryptionError {
    /// The recovered key does not match the stored checksum.
    #[error("invalid password")]
    InvalidPassword,

    /// Security level parameters outside what the format can carry.
    #[error("invalid security level: {0}")]
    InvalidSecurityLevel(String),

    /// Only `K1` keys can be encrypted.
    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(KeyType),

    /// Encrypted key data of the wrong size.
    #[error("invalid encrypted key: {0}")]
    InvalidEncryptedKey(String),

    /// The key derivation function rejected its inputs.
    #[error("key derivation failed: {0}")]
    Kdf(String),

    /// Underlying key or encoding failure.
    #[error("primitives error: {0}")]
    Primitives(#[from] antelope_primitives::PrimitivesError),
}
