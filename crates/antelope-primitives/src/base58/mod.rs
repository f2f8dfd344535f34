//! Base58 encoding and decoding with Antelope checksum variants.
//!
//! Provides raw Base58 encode/decode plus the two checksummed forms used
//! by Antelope key strings:
//! - RIPEMD-160 checksums over `payload || suffix` (`PUB_K1_`, `PVT_K1_`,
//!   `SEC_K1_` strings, suffix is the key type tag such as `"K1"`);
//! - double-SHA-256 checksums (legacy WIF private keys).

use crate::hash::{ripemd160_with_suffix, sha256d};
use crate::PrimitivesError;

/// Length of every Antelope base58 checksum.
pub const CHECKSUM_LEN: usize = 4;

/// Encode a byte slice to a Base58 string (Bitcoin alphabet).
///
/// Leading zero bytes are encoded as leading '1' characters.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).with_alphabet(bs58::Alphabet::BITCOIN).into_string()
}

/// Decode a Base58 string to a byte vector.
///
/// # Returns
/// `Ok(Vec<u8>)` on success, or an error for invalid characters.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

/// Encode `data` with a trailing RIPEMD-160 checksum.
///
/// The checksum is the first 4 bytes of RIPEMD-160(`data || suffix`).
/// An empty suffix gives the legacy `EOS` public key checksum.
///
/// # Arguments
/// * `data` - The payload bytes.
/// * `suffix` - The key type tag mixed into the checksum (e.g. `b"K1"`).
pub fn encode_ripemd160_check(data: &[u8], suffix: &[u8]) -> String {
    let checksum = ripemd160_with_suffix(data, suffix);
    let mut payload = Vec::with_capacity(data.len() + CHECKSUM_LEN);
    payload.extend_from_slice(data);
    payload.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    encode(&payload)
}

/// Decode a string produced by [`encode_ripemd160_check`], verifying the checksum.
///
/// # Returns
/// The payload without checksum, or `ChecksumMismatch`.
pub fn decode_ripemd160_check(s: &str, suffix: &[u8]) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = decode(s)?;
    let (payload, checksum) = split_checksum(&decoded)?;
    let expected = ripemd160_with_suffix(payload, suffix);
    if checksum != &expected[..CHECKSUM_LEN] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}

/// Encode a byte slice with a 4-byte double-SHA-256 checksum appended.
///
/// Used for legacy WIF private keys.
pub fn check_encode(data: &[u8]) -> String {
    let checksum = sha256d(data);
    let mut payload = data.to_vec();
    payload.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    encode(&payload)
}

/// Decode a double-SHA-256 checksummed Base58 string.
///
/// # Returns
/// The payload without checksum, or an error for invalid encoding or
/// checksum mismatch.
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = decode(s)?;
    let (payload, checksum) = split_checksum(&decoded)?;
    let expected = sha256d(payload);
    if checksum != &expected[..CHECKSUM_LEN] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}

fn split_checksum(decoded: &[u8]) -> Result<(&[u8], &[u8]), PrimitivesError> {
    if decoded.len() < CHECKSUM_LEN {
        return Err(PrimitivesError::InvalidBase58(
            "data too short for checksum".to_string(),
        ));
    }
    Ok(decoded.split_at(decoded.len() - CHECKSUM_LEN))
}
