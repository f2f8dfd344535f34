//! Antelope account and permission names.
//!
//! A name packs up to 13 characters from `.12345abcdefghijklmnopqrstuvwxyz`
//! into a `u64`: the first 12 characters take 5 bits each from the high end
//! down, the 13th takes the remaining low 4 bits (so it is limited to
//! `.12345abcdefghij`). Trailing dots are not significant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::serializer::{AbiDeserialize, AbiReader, AbiSerialize, AbiWriter};
use crate::PrimitivesError;

/// Symbol alphabet, indexed by 5-bit value.
const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// Longest possible name.
pub const MAX_NAME_LEN: usize = 13;

/// A 64-bit Antelope name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct Name(u64);

impl Name {
    /// Wrap a raw name value.
    pub const fn from_u64(value: u64) -> Self {
        Name(value)
    }

    /// The raw 64-bit value.
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Encode a name string.
    ///
    /// # Arguments
    /// * `s` - Up to 13 characters from the name alphabet.
    ///
    /// # Returns
    /// The encoded name, or `InvalidName` for bad characters or length.
    pub fn from_string(s: &str) -> Result<Self, PrimitivesError> {
        if s.len() > MAX_NAME_LEN {
            return Err(PrimitivesError::InvalidName(format!(
                "{} is longer than {} characters",
                s, MAX_NAME_LEN
            )));
        }
        let mut value = 0u64;
        for (i, c) in s.bytes().enumerate() {
            let symbol = char_to_symbol(c).ok_or_else(|| {
                PrimitivesError::InvalidName(format!("{} contains invalid character", s))
            })?;
            if i < 12 {
                value |= (symbol & 0x1f) << (64 - 5 * (i + 1));
            } else {
                if symbol > 0x0f {
                    return Err(PrimitivesError::InvalidName(format!(
                        "thirteenth character of {} must be one of .12345abcdefghij",
                        s
                    )));
                }
                value |= symbol;
            }
        }
        Ok(Name(value))
    }

    /// Whether this is the empty name.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

fn char_to_symbol(c: u8) -> Option<u64> {
    match c {
        b'a'..=b'z' => Some((c - b'a') as u64 + 6),
        b'1'..=b'5' => Some((c - b'1') as u64 + 1),
        b'.' => Some(0),
        _ => None,
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = [b'.'; MAX_NAME_LEN];
        let mut tmp = self.0;
        for i in 0..MAX_NAME_LEN {
            let (mask, shift) = if i == 0 { (0x0f, 4) } else { (0x1f, 5) };
            out[MAX_NAME_LEN - 1 - i] = CHARMAP[(tmp & mask) as usize];
            tmp >>= shift;
        }
        let end = out.iter().rposition(|&c| c != b'.').map_or(0, |p| p + 1);
        // every byte comes from CHARMAP, which is ASCII
        for &c in &out[..end] {
            fmt::Write::write_char(f, c as char)?;
        }
        Ok(())
    }
}

impl FromStr for Name {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Name::from_string(s)
    }
}

impl From<Name> for u64 {
    fn from(name: Name) -> u64 {
        name.0
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Name::from_string(&s).map_err(serde::de::Error::custom)
    }
}

impl AbiSerialize for Name {
    fn write_abi(&self, w: &mut AbiWriter) {
        w.write_u64_le(self.0);
    }
}

impl AbiDeserialize for Name {
    fn read_abi(r: &mut AbiReader<'_>) -> Result<Self, PrimitivesError> {
        Ok(Name(r.read_u64_le()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer;

    #[test]
    fn test_known_values() {
        let cases = [
            ("dingdong.gm", 0x4ba6_c4d2_6c03_2400u64),
            ("owner", 0xa726_ab80_0000_0000),
            ("active", 0x3232_eda8_0000_0000),
            ("eosio", 0x5530_ea00_0000_0000),
        ];
        for (s, v) in cases {
            let name = Name::from_string(s).unwrap();
            assert_eq!(name.value(), v, "{}", s);
            assert_eq!(name.to_string(), s);
        }
    }

    #[test]
    fn test_binary_is_little_endian() {
        let name: Name = "dingdong.gm".parse().unwrap();
        assert_eq!(hex::encode(serializer::encode(&name)), "0024036cd2c4a64b");
        let owner: Name = "owner".parse().unwrap();
        assert_eq!(hex::encode(serializer::encode(&owner)), "0000000080ab26a7");
    }

    #[test]
    fn test_empty_name() {
        let name = Name::from_string("").unwrap();
        assert!(name.is_empty());
        assert_eq!(name.to_string(), "");
    }

    #[test]
    fn test_thirteen_characters() {
        let name = Name::from_string("aaaaaaaaaaaaj").unwrap();
        assert_eq!(name.to_string(), "aaaaaaaaaaaaj");
        assert!(Name::from_string("aaaaaaaaaaaak").is_err());
        assert!(Name::from_string("aaaaaaaaaaaaaa").is_err());
    }

    #[test]
    fn test_invalid_characters() {
        assert!(Name::from_string("Owner").is_err());
        assert!(Name::from_string("own6r").is_err());
        assert!(Name::from_string("own-r").is_err());
    }

    #[test]
    fn test_trailing_dots_are_dropped() {
        let name = Name::from_string("abc..").unwrap();
        assert_eq!(name, Name::from_string("abc").unwrap());
        assert_eq!(name.to_string(), "abc");
    }
}
