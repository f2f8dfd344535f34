//! scrypt work factor for encrypted keys.
//!
//! The level travels inside the encrypted key as a single byte: the high
//! nibble holds `log2(N) - 12` and the low nibble holds `log2(r)`. `p` is
//! always 1.

use serde::{Deserialize, Serialize};

use crate::KeyEncryptionError;

/// Smallest supported `log2(N)`.
const MIN_LOG_N: u8 = 12;
/// Largest supported `log2(N)`.
const MAX_LOG_N: u8 = MIN_LOG_N + 0x0f;
/// Largest supported `log2(r)`.
const MAX_LOG_R: u8 = 0x0f;

/// scrypt cost parameters.
///
/// Deserializes from `{"N": 65536, "r": 16, "p": 1}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecurityLevel {
    /// CPU/memory cost, a power of two.
    #[serde(rename = "N")]
    pub n: u32,
    /// Block size, a power of two.
    pub r: u32,
    /// Parallelization; must be 1.
    pub p: u32,
}

impl SecurityLevel {
    /// Fast; suitable for tests and throwaway keys.
    pub const LOW: SecurityLevel = SecurityLevel { n: 16384, r: 8, p: 1 };
    /// The default level.
    pub const MEDIUM: SecurityLevel = SecurityLevel { n: 65536, r: 16, p: 1 };
    /// Slow; uses about 512 MiB of memory.
    pub const HIGH: SecurityLevel = SecurityLevel { n: 262144, r: 16, p: 1 };

    /// Build a level from raw parameters, validating them.
    pub fn new(n: u32, r: u32, p: u32) -> Result<Self, KeyEncryptionError> {
        let level = SecurityLevel { n, r, p };
        level.validate()?;
        Ok(level)
    }

    /// Check that the parameters can be packed into the security byte.
    pub fn validate(&self) -> Result<(), KeyEncryptionError> {
        self.to_byte().map(|_| ())
    }

    /// `log2(N)`.
    pub fn log_n(&self) -> Result<u8, KeyEncryptionError> {
        let log_n = exact_log2(self.n).ok_or_else(|| {
            KeyEncryptionError::InvalidSecurityLevel(format!("N must be a power of two, got {}", self.n))
        })?;
        if !(MIN_LOG_N..=MAX_LOG_N).contains(&log_n) {
            return Err(KeyEncryptionError::InvalidSecurityLevel(format!(
                "N must be between 2^{} and 2^{}, got {}",
                MIN_LOG_N, MAX_LOG_N, self.n
            )));
        }
        Ok(log_n)
    }

    /// Pack into the security byte.
    pub fn to_byte(&self) -> Result<u8, KeyEncryptionError> {
        let log_n = self.log_n()?;
        let log_r = exact_log2(self.r)
            .filter(|l| *l <= MAX_LOG_R)
            .ok_or_else(|| {
                KeyEncryptionError::InvalidSecurityLevel(format!(
                    "r must be a power of two no larger than 2^{}, got {}",
                    MAX_LOG_R, self.r
                ))
            })?;
        if self.p != 1 {
            return Err(KeyEncryptionError::InvalidSecurityLevel(format!(
                "p must be 1, got {}",
                self.p
            )));
        }
        Ok(((log_n - MIN_LOG_N) << 4) | log_r)
    }

    /// Unpack a security byte. Every byte value is a valid level.
    pub fn from_byte(byte: u8) -> Self {
        SecurityLevel {
            n: 1 << (MIN_LOG_N + (byte >> 4)),
            r: 1 << (byte & 0x0f),
            p: 1,
        }
    }
}

impl Default for SecurityLevel {
    fn default() -> Self {
        SecurityLevel::MEDIUM
    }
}

fn exact_log2(v: u32) -> Option<u8> {
    if v.is_power_of_two() {
        Some(v.trailing_zeros() as u8)
    } else {
        None
    }
}
