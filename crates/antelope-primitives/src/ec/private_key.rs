//! secp256k1 private key with Antelope string forms.
//!
//! Wraps a k256 signing key and adds the `PVT_K1_` string encoding, the
//! legacy uncompressed WIF encoding (`5…`), and public key derivation.

use std::fmt;
use std::str::FromStr;

use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::base58;
use crate::ec::key_type::KeyType;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
pub const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// Prefix of modern private key strings, followed by the key type tag.
const PRIVATE_KEY_PREFIX: &str = "PVT_";

/// Legacy WIF version byte.
const WIF_VERSION: u8 = 0x80;

/// Compression flag byte that may follow the scalar in a WIF payload.
const COMPRESS_MAGIC: u8 = 0x01;

/// A secp256k1 (`K1`) private key.
///
/// Displays as `PVT_K1_<base58>`; parses that form as well as legacy WIF.
#[derive(Clone)]
pub struct PrivateKey {
    /// The underlying k256 signing key.
    inner: SigningKey,
}

impl PrivateKey {
    /// Generate a new random private key using the OS random number generator.
    pub fn new() -> Self {
        PrivateKey {
            inner: SigningKey::random(&mut OsRng),
        }
    }

    /// Create a private key from a raw 32-byte scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte slice representing the private key scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes represent a valid scalar on secp256k1,
    /// or an error if the scalar is zero or out of range.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: PRIVATE_KEY_BYTES_LEN,
                got: bytes.len(),
            });
        }
        let signing_key = SigningKey::from_bytes(bytes.into())
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner: signing_key })
    }

    /// Create a private key from a hexadecimal string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Parse a private key string.
    ///
    /// Accepts `PVT_K1_<base58 key || ripemd160(key || "K1")[..4]>` and
    /// legacy WIF. Other key types (`PVT_R1_`) are rejected.
    ///
    /// # Arguments
    /// * `s` - The key string.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, or an error if the string is malformed,
    /// the checksum fails, or the key type is unsupported.
    pub fn from_string(s: &str) -> Result<Self, PrimitivesError> {
        match s.strip_prefix(PRIVATE_KEY_PREFIX) {
            Some(rest) => {
                let (tag, data) = rest.split_once('_').ok_or_else(|| {
                    PrimitivesError::InvalidPrivateKey("missing key type tag".to_string())
                })?;
                let key_type: KeyType = tag.parse()?;
                key_type.require_k1()?;
                let bytes = base58::decode_ripemd160_check(data, key_type.as_str().as_bytes())?;
                Self::from_bytes(&bytes)
            }
            None => Self::from_wif(s),
        }
    }

    /// Create a private key from a legacy WIF string.
    ///
    /// Antelope WIF keys are uncompressed (`0x80 || key`), but a trailing
    /// compression flag is tolerated.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        let payload =
            base58::check_decode(wif).map_err(|e| PrimitivesError::InvalidWif(e.to_string()))?;
        let key_bytes = match payload.len() {
            33 => &payload[1..],
            34 if payload[33] == COMPRESS_MAGIC => &payload[1..33],
            34 => {
                return Err(PrimitivesError::InvalidWif(
                    "invalid compression flag".to_string(),
                ))
            }
            other => {
                return Err(PrimitivesError::InvalidWif(format!(
                    "invalid payload length {}",
                    other
                )))
            }
        };
        if payload[0] != WIF_VERSION {
            return Err(PrimitivesError::InvalidWif(format!(
                "unexpected version byte 0x{:02x}",
                payload[0]
            )));
        }
        Self::from_bytes(key_bytes)
    }

    /// Encode the key as a legacy (uncompressed) WIF string.
    pub fn to_wif(&self) -> String {
        let mut payload = Zeroizing::new(Vec::with_capacity(1 + PRIVATE_KEY_BYTES_LEN));
        payload.push(WIF_VERSION);
        payload.extend_from_slice(&self.to_bytes()[..]);
        base58::check_encode(&payload)
    }

    /// The key type; always `K1`.
    pub fn key_type(&self) -> KeyType {
        KeyType::K1
    }

    /// Serialize the private key as a 32-byte big-endian array.
    ///
    /// The buffer is wiped when dropped.
    pub fn to_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_BYTES_LEN]> {
        Zeroizing::new(self.inner.to_bytes().into())
    }

    /// Serialize the private key as a lowercase hexadecimal string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.to_bytes()[..])
    }

    /// Derive the corresponding public key for this private key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_k256_verifying_key(self.inner.verifying_key())
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.key_type().as_str();
        write!(
            f,
            "{}{}_{}",
            PRIVATE_KEY_PREFIX,
            tag,
            base58::encode_ripemd160_check(&self.to_bytes()[..], tag.as_bytes())
        )
    }
}

// Never print key material.
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({}, {})", self.key_type(), self.public_key())
    }
}

impl FromStr for PrivateKey {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}
