//! Antelope key type tag.

use std::fmt;
use std::str::FromStr;

use crate::serializer::{AbiDeserialize, AbiReader, AbiSerialize, AbiWriter};
use crate::PrimitivesError;

/// Curve / format tag carried by Antelope keys and signatures.
///
/// Encoded as a single byte on the wire and as a two letter tag in key
/// strings (`PVT_K1_…`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// secp256k1
    K1,
    /// secp256r1
    R1,
    /// WebAuthn
    WA,
}

impl KeyType {
    /// The wire index of this key type.
    pub fn index(self) -> u8 {
        match self {
            KeyType::K1 => 0,
            KeyType::R1 => 1,
            KeyType::WA => 2,
        }
    }

    /// Look up a key type by wire index.
    pub fn from_index(index: u8) -> Result<Self, PrimitivesError> {
        match index {
            0 => Ok(KeyType::K1),
            1 => Ok(KeyType::R1),
            2 => Ok(KeyType::WA),
            other => Err(PrimitivesError::UnsupportedKeyType(format!(
                "unknown key type index {}",
                other
            ))),
        }
    }

    /// The two letter tag used in key strings and RIPEMD-160 checksums.
    pub fn as_str(self) -> &'static str {
        match self {
            KeyType::K1 => "K1",
            KeyType::R1 => "R1",
            KeyType::WA => "WA",
        }
    }

    /// Fail unless this is `K1`, the only curve this crate implements.
    pub fn require_k1(self) -> Result<(), PrimitivesError> {
        match self {
            KeyType::K1 => Ok(()),
            other => Err(PrimitivesError::UnsupportedKeyType(other.to_string())),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "K1" => Ok(KeyType::K1),
            "R1" => Ok(KeyType::R1),
            "WA" => Ok(KeyType::WA),
            other => Err(PrimitivesError::UnsupportedKeyType(other.to_string())),
        }
    }
}

impl AbiSerialize for KeyType {
    fn write_abi(&self, w: &mut AbiWriter) {
        w.write_u8(self.index());
    }
}

impl AbiDeserialize for KeyType {
    fn read_abi(r: &mut AbiReader<'_>) -> Result<Self, PrimitivesError> {
        KeyType::from_index(r.read_u8()?)
    }
}
