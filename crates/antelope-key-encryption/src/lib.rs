#![deny(missing_docs)]

//! # antelope-key-encryption
//!
//! Password-based encryption of Antelope `K1` private keys.
//!
//! An [`EncryptedPrivateKey`] carries a one byte security level, a four
//! byte checksum of the public key and the 32 byte ciphertext. It displays
//! as `SEC_K1_<base58>` and serializes as a key type byte followed by the
//! 37 data bytes.
//!
//! Encryption derives 48 bytes with scrypt from the password, salted with
//! the checksum. The first 16 bytes are the IV and the rest the key for
//! AES-256-CBC over the 32 key bytes, without padding. Decryption
//! recomputes the checksum from the recovered key to detect a wrong
//! password.
//!
//! # Example
//!
//! ```no_run
//! use antelope_key_encryption::{EncryptedPrivateKey, SecurityLevel};
//! use antelope_primitives::PrivateKey;
//!
//! # async fn run() -> Result<(), antelope_key_encryption::KeyEncryptionError> {
//! let key = PrivateKey::new();
//! let encrypted =
//!     EncryptedPrivateKey::encrypt(&key, b"hunter2", None, Some(SecurityLevel::LOW)).await?;
//! let decrypted = encrypted.decrypt(b"hunter2", None).await?;
//! assert_eq!(decrypted, key);
//! # Ok(())
//! # }
//! ```

pub mod encrypted_key;
pub mod error;
pub mod security_level;

#[cfg(test)]
mod tests;

pub use encrypted_key::{EncryptedPrivateKey, Progress, ENCRYPTED_KEY_DATA_LEN};
pub use error::KeyEncryptionError;
pub use security_level::SecurityLevel;
