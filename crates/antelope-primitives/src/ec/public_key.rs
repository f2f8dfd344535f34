//! secp256k1 public key with Antelope string forms.

use std::fmt;
use std::str::FromStr;

use k256::ecdsa::VerifyingKey;

use crate::base58;
use crate::ec::key_type::KeyType;
use crate::PrimitivesError;

/// Length of a compressed SEC1 public key.
pub const PUBLIC_KEY_COMPRESSED_LEN: usize = 33;

/// Prefix of modern public key strings, followed by the key type tag.
const PUBLIC_KEY_PREFIX: &str = "PUB_";

/// Prefix of legacy public key strings.
const LEGACY_PREFIX: &str = "EOS";

/// A secp256k1 (`K1`) public key.
///
/// Displays as `PUB_K1_<base58>`. The legacy `EOS…` form is available
/// through [`PublicKey::to_legacy_string`] and accepted by
/// [`PublicKey::from_string`].
#[derive(Clone, Debug)]
pub struct PublicKey {
    inner: VerifyingKey,
}

impl PublicKey {
    /// Parse a public key from SEC1 bytes (compressed or uncompressed).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let verifying_key = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey { inner: verifying_key })
    }

    /// Create a public key from a k256 verifying key.
    pub(crate) fn from_k256_verifying_key(key: &VerifyingKey) -> Self {
        PublicKey { inner: *key }
    }

    /// Parse a public key string.
    ///
    /// Accepts `PUB_K1_<base58 key || ripemd160(key || "K1")[..4]>` and the
    /// legacy `EOS<base58 key || ripemd160(key)[..4]>` form.
    pub fn from_string(s: &str) -> Result<Self, PrimitivesError> {
        if let Some(rest) = s.strip_prefix(PUBLIC_KEY_PREFIX) {
            let (tag, data) = rest.split_once('_').ok_or_else(|| {
                PrimitivesError::InvalidPublicKey("missing key type tag".to_string())
            })?;
            let key_type: KeyType = tag.parse()?;
            key_type.require_k1()?;
            let bytes = base58::decode_ripemd160_check(data, key_type.as_str().as_bytes())?;
            return Self::from_compressed_checked(&bytes);
        }
        if let Some(data) = s.strip_prefix(LEGACY_PREFIX) {
            let bytes = base58::decode_ripemd160_check(data, b"")?;
            return Self::from_compressed_checked(&bytes);
        }
        Err(PrimitivesError::InvalidPublicKey(format!(
            "unrecognized public key format: {}",
            s
        )))
    }

    fn from_compressed_checked(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PUBLIC_KEY_COMPRESSED_LEN {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: PUBLIC_KEY_COMPRESSED_LEN,
                got: bytes.len(),
            });
        }
        Self::from_bytes(bytes)
    }

    /// The key type; always `K1`.
    pub fn key_type(&self) -> KeyType {
        KeyType::K1
    }

    /// Serialize the public key in compressed SEC1 format (33 bytes).
    pub fn to_compressed(&self) -> [u8; PUBLIC_KEY_COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; PUBLIC_KEY_COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize the compressed key as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Encode as a legacy `EOS…` string.
    pub fn to_legacy_string(&self) -> String {
        format!(
            "{}{}",
            LEGACY_PREFIX,
            base58::encode_ripemd160_check(&self.to_compressed(), b"")
        )
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_compressed() == other.to_compressed()
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.key_type().as_str();
        write!(
            f,
            "{}{}_{}",
            PUBLIC_KEY_PREFIX,
            tag,
            base58::encode_ripemd160_check(&self.to_compressed(), tag.as_bytes())
        )
    }
}

impl FromStr for PublicKey {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}
