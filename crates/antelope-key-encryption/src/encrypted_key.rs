//! Encrypted private key value and the encrypt / decrypt operations.

use std::fmt;
use std::str::FromStr;

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;
use zeroize::Zeroizing;

use antelope_primitives::base58;
use antelope_primitives::ec::private_key::PRIVATE_KEY_BYTES_LEN;
use antelope_primitives::hash::sha256d;
use antelope_primitives::serializer::{self, AbiDeserialize, AbiReader, AbiSerialize, AbiWriter};
use antelope_primitives::{KeyType, PrimitivesError, PrivateKey, PublicKey};

use crate::security_level::SecurityLevel;
use crate::KeyEncryptionError;

/// Length of the encrypted key data: security byte, checksum, ciphertext.
pub const ENCRYPTED_KEY_DATA_LEN: usize = 1 + CHECKSUM_LEN + PRIVATE_KEY_BYTES_LEN;

/// Length of the public key checksum that also salts the KDF.
const CHECKSUM_LEN: usize = 4;

/// AES block size; also the CBC IV length.
const BLOCK_LEN: usize = 16;

/// Bytes of scrypt output: CBC IV followed by the AES-256 key.
const DERIVED_KEY_LEN: usize = BLOCK_LEN + 32;

/// Prefix of encrypted key strings, followed by the key type tag.
const ENCRYPTED_KEY_PREFIX: &str = "SEC_";

/// Progress observer; receives values in `[0, 1]`.
///
/// The `scrypt` crate has no progress hook, so the observer is called with
/// `0.0` before key derivation and `1.0` after it, nothing in between.
pub type Progress<'a> = &'a (dyn Fn(f64) + Sync);

/// A password-encrypted private key.
///
/// Layout of `data`: `security (1) | checksum (4) | ciphertext (32)`.
/// The binary form prefixes the key type byte, 38 bytes in all.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EncryptedPrivateKey {
    key_type: KeyType,
    data: [u8; ENCRYPTED_KEY_DATA_LEN],
}

impl EncryptedPrivateKey {
    /// Wrap raw `K1` encrypted key data.
    pub fn new(data: [u8; ENCRYPTED_KEY_DATA_LEN]) -> Self {
        EncryptedPrivateKey {
            key_type: KeyType::K1,
            data,
        }
    }

    /// Build from a key type and data, rejecting anything but `K1`.
    pub fn from_parts(key_type: KeyType, data: &[u8]) -> Result<Self, KeyEncryptionError> {
        if key_type != KeyType::K1 {
            return Err(KeyEncryptionError::UnsupportedKeyType(key_type));
        }
        let data: [u8; ENCRYPTED_KEY_DATA_LEN] = data.try_into().map_err(|_| {
            KeyEncryptionError::InvalidEncryptedKey(format!(
                "expected {} bytes of key data, got {}",
                ENCRYPTED_KEY_DATA_LEN,
                data.len()
            ))
        })?;
        Ok(EncryptedPrivateKey { key_type, data })
    }

    /// Parse a `SEC_K1_…` string.
    ///
    /// # Returns
    /// The encrypted key, or an error for a bad prefix, an unsupported key
    /// type, a checksum mismatch or the wrong data length.
    pub fn from_string(s: &str) -> Result<Self, KeyEncryptionError> {
        let rest = s.strip_prefix(ENCRYPTED_KEY_PREFIX).ok_or_else(|| {
            KeyEncryptionError::InvalidEncryptedKey(format!("missing {} prefix", ENCRYPTED_KEY_PREFIX))
        })?;
        let (tag, encoded) = rest.split_once('_').ok_or_else(|| {
            KeyEncryptionError::InvalidEncryptedKey("missing key type tag".to_string())
        })?;
        let key_type: KeyType = tag.parse()?;
        if key_type != KeyType::K1 {
            return Err(KeyEncryptionError::UnsupportedKeyType(key_type));
        }
        let data = base58::decode_ripemd160_check(encoded, key_type.as_str().as_bytes())?;
        Self::from_parts(key_type, &data)
    }

    /// Decode the 38-byte binary form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyEncryptionError> {
        Ok(serializer::decode(bytes)?)
    }

    /// Encode the 38-byte binary form.
    pub fn to_bytes(&self) -> Vec<u8> {
        serializer::encode(self)
    }

    /// The key type; always `K1`.
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// The 37 data bytes.
    pub fn data(&self) -> &[u8; ENCRYPTED_KEY_DATA_LEN] {
        &self.data
    }

    /// The scrypt parameters this key was encrypted with.
    pub fn security_level(&self) -> SecurityLevel {
        SecurityLevel::from_byte(self.data[0])
    }

    /// Checksum of the public key, also used as the KDF salt.
    pub fn checksum(&self) -> &[u8] {
        &self.data[1..1 + CHECKSUM_LEN]
    }

    fn ciphertext(&self) -> &[u8] {
        &self.data[1 + CHECKSUM_LEN..]
    }

    /// Encrypt a private key under `password`.
    ///
    /// # Arguments
    /// * `private_key` - The key to protect.
    /// * `password` - Arbitrary password bytes.
    /// * `progress` - Optional observer, called at the start and end of key derivation.
    /// * `security_level` - scrypt parameters; defaults to [`SecurityLevel::MEDIUM`].
    ///
    /// # Returns
    /// The encrypted key, or an error if the security level cannot be encoded.
    pub async fn encrypt(
        private_key: &PrivateKey,
        password: &[u8],
        progress: Option<Progress<'_>>,
        security_level: Option<SecurityLevel>,
    ) -> Result<Self, KeyEncryptionError> {
        let key_type = private_key.key_type();
        if key_type != KeyType::K1 {
            return Err(KeyEncryptionError::UnsupportedKeyType(key_type));
        }
        let level = security_level.unwrap_or_default();
        let security = level.to_byte()?;
        let checksum = public_key_checksum(&private_key.public_key());
        debug!(n = level.n, r = level.r, p = level.p, "encrypting private key");

        let dk = derive_key(password, &checksum, &level, progress)?;
        let mut block = private_key.to_bytes();
        let (iv, key) = dk.split_at(BLOCK_LEN);
        let cipher = Aes256::new(GenericArray::from_slice(key));
        let mut chain = [0u8; BLOCK_LEN];
        chain.copy_from_slice(iv);
        for chunk in block.chunks_exact_mut(BLOCK_LEN) {
            xor_in_place(chunk, &chain);
            cipher.encrypt_block(GenericArray::from_mut_slice(chunk));
            chain.copy_from_slice(chunk);
        }

        let mut data = [0u8; ENCRYPTED_KEY_DATA_LEN];
        data[0] = security;
        data[1..1 + CHECKSUM_LEN].copy_from_slice(&checksum);
        data[1 + CHECKSUM_LEN..].copy_from_slice(&block[..]);
        Ok(EncryptedPrivateKey::new(data))
    }

    /// Decrypt with `password`.
    ///
    /// # Returns
    /// The private key, or `InvalidPassword` when the recovered key does
    /// not match the stored checksum.
    pub async fn decrypt(
        &self,
        password: &[u8],
        progress: Option<Progress<'_>>,
    ) -> Result<PrivateKey, KeyEncryptionError> {
        let level = self.security_level();
        debug!(n = level.n, r = level.r, p = level.p, "decrypting private key");

        let dk = derive_key(password, self.checksum(), &level, progress)?;
        let mut block = Zeroizing::new([0u8; PRIVATE_KEY_BYTES_LEN]);
        block.copy_from_slice(self.ciphertext());
        let (iv, key) = dk.split_at(BLOCK_LEN);
        let cipher = Aes256::new(GenericArray::from_slice(key));
        let mut chain = [0u8; BLOCK_LEN];
        chain.copy_from_slice(iv);
        for chunk in block.chunks_exact_mut(BLOCK_LEN) {
            let mut next = [0u8; BLOCK_LEN];
            next.copy_from_slice(chunk);
            cipher.decrypt_block(GenericArray::from_mut_slice(chunk));
            xor_in_place(chunk, &chain);
            chain = next;
        }

        // a wrong password yields either an invalid scalar or a different key
        let key = PrivateKey::from_bytes(&block[..]).map_err(|_| KeyEncryptionError::InvalidPassword)?;
        if public_key_checksum(&key.public_key())[..] != *self.checksum() {
            return Err(KeyEncryptionError::InvalidPassword);
        }
        Ok(key)
    }
}

/// First four bytes of SHA-256d over the `PUB_K1_` string.
fn public_key_checksum(public_key: &PublicKey) -> [u8; CHECKSUM_LEN] {
    let digest = sha256d(public_key.to_string().as_bytes());
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

fn derive_key(
    password: &[u8],
    salt: &[u8],
    level: &SecurityLevel,
    progress: Option<Progress<'_>>,
) -> Result<Zeroizing<[u8; DERIVED_KEY_LEN]>, KeyEncryptionError> {
    let params = scrypt::Params::new(level.log_n()?, level.r, level.p, DERIVED_KEY_LEN)
        .map_err(|e| KeyEncryptionError::Kdf(e.to_string()))?;
    if let Some(report) = progress {
        report(0.0);
    }
    let mut dk = Zeroizing::new([0u8; DERIVED_KEY_LEN]);
    scrypt::scrypt(password, salt, &params, &mut dk[..])
        .map_err(|e| KeyEncryptionError::Kdf(e.to_string()))?;
    if let Some(report) = progress {
        report(1.0);
    }
    Ok(dk)
}

fn xor_in_place(buf: &mut [u8], mask: &[u8]) {
    for (b, m) in buf.iter_mut().zip(mask) {
        *b ^= m;
    }
}

impl fmt::Display for EncryptedPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.key_type.as_str();
        write!(
            f,
            "{}{}_{}",
            ENCRYPTED_KEY_PREFIX,
            tag,
            base58::encode_ripemd160_check(&self.data, tag.as_bytes())
        )
    }
}

impl FromStr for EncryptedPrivateKey {
    type Err = KeyEncryptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EncryptedPrivateKey::from_string(s)
    }
}

impl Serialize for EncryptedPrivateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EncryptedPrivateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        EncryptedPrivateKey::from_string(&s).map_err(serde::de::Error::custom)
    }
}

impl AbiSerialize for EncryptedPrivateKey {
    fn write_abi(&self, w: &mut AbiWriter) {
        self.key_type.write_abi(w);
        w.write_bytes(&self.data);
    }
}

impl AbiDeserialize for EncryptedPrivateKey {
    fn read_abi(r: &mut AbiReader<'_>) -> Result<Self, PrimitivesError> {
        let key_type = KeyType::read_abi(r)?;
        key_type.require_k1()?;
        let data = r.read_array()?;
        Ok(EncryptedPrivateKey { key_type, data })
    }
}
