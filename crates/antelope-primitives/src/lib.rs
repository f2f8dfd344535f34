/// Antelope primitives for key certificates.
///
/// This crate provides the building blocks the certificate envelope and the
/// key encryption crate sit on:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160)
/// - Base58 encoding with Antelope RIPEMD-160 and WIF checksums
/// - secp256k1 (`K1`) private and public keys in their Antelope string forms
/// - Chain types: chain id, account name, permission level
/// - ABI binary reader/writer and the ordered-field serialization traits

pub mod hash;
pub mod base58;
pub mod ec;
pub mod chain;
pub mod serializer;

mod error;
pub use error::PrimitivesError;

pub use chain::{ChainId, Name, PermissionLevel};
pub use ec::{KeyType, PrivateKey, PublicKey};
