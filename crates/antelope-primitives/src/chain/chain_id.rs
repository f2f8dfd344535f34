//! Chain identifier.
//!
//! A `ChainId` is the 32-byte hash identifying an Antelope chain. Unlike a
//! transaction hash it is displayed in storage order as lowercase hex.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::serializer::{AbiDeserialize, AbiReader, AbiSerialize, AbiWriter};
use crate::PrimitivesError;

/// Size of a chain id in bytes.
pub const CHAIN_ID_SIZE: usize = 32;

/// A 32-byte chain identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct ChainId([u8; CHAIN_ID_SIZE]);

impl ChainId {
    /// Create a chain id from a raw 32-byte array.
    pub fn new(bytes: [u8; CHAIN_ID_SIZE]) -> Self {
        ChainId(bytes)
    }

    /// Create a chain id from a byte slice.
    ///
    /// # Arguments
    /// * `bytes` - A slice that must be exactly 32 bytes.
    ///
    /// # Returns
    /// `Ok(ChainId)` if the slice is 32 bytes, or an error otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != CHAIN_ID_SIZE {
            return Err(PrimitivesError::InvalidChainId(format!(
                "invalid chain id length of {}, want {}",
                bytes.len(),
                CHAIN_ID_SIZE
            )));
        }
        let mut arr = [0u8; CHAIN_ID_SIZE];
        arr.copy_from_slice(bytes);
        Ok(ChainId(arr))
    }

    /// Create a chain id from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.len() != CHAIN_ID_SIZE * 2 {
            return Err(PrimitivesError::InvalidChainId(format!(
                "expected {} hex characters, got {}",
                CHAIN_ID_SIZE * 2,
                hex_str.len()
            )));
        }
        let decoded = hex::decode(hex_str)?;
        Self::from_bytes(&decoded)
    }

    /// Access the raw bytes.
    pub fn as_bytes(&self) -> &[u8; CHAIN_ID_SIZE] {
        &self.0
    }

    /// Lowercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ChainId {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChainId::from_hex(s)
    }
}

impl From<[u8; CHAIN_ID_SIZE]> for ChainId {
    fn from(bytes: [u8; CHAIN_ID_SIZE]) -> Self {
        ChainId(bytes)
    }
}

/// Serialize as a hex string in JSON.
impl Serialize for ChainId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Deserialize from a hex string in JSON.
impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ChainId::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl AbiSerialize for ChainId {
    fn write_abi(&self, w: &mut AbiWriter) {
        w.write_bytes(&self.0);
    }
}

impl AbiDeserialize for ChainId {
    fn read_abi(r: &mut AbiReader<'_>) -> Result<Self, PrimitivesError> {
        Ok(ChainId(r.read_array()?))
    }
}
