//! Lossless byte <-> word conversion.
//!
//! Bytes are read as one big-endian bit string, zero-padded on the high
//! side up to a multiple of 11 bits, and cut into 11-bit word indices.
//! There is no checksum word; the first word carries the padding.

use crate::wordlist::{self, BITS_PER_WORD};
use crate::CertificateError;

/// Words in an encryption passphrase.
pub const PASSPHRASE_WORDS: usize = 6;

/// Password bytes produced from a passphrase.
pub const PASSPHRASE_BYTES: usize = byte_capacity(PASSPHRASE_WORDS);

const INDEX_MASK: u32 = (1 << BITS_PER_WORD) - 1;

/// Number of words needed to hold `byte_len` bytes.
pub const fn word_count(byte_len: usize) -> usize {
    (byte_len * 8 + BITS_PER_WORD - 1) / BITS_PER_WORD
}

/// Number of bytes needed to hold every bit of `word_count` words.
pub const fn byte_capacity(word_count: usize) -> usize {
    (word_count * BITS_PER_WORD + 7) / 8
}

/// Encode bytes as vocabulary words.
///
/// Produces exactly [`word_count`]`(bytes.len())` words; an empty input
/// gives no words.
pub fn encode(bytes: &[u8]) -> Vec<String> {
    let count = word_count(bytes.len());
    let mut out = Vec::with_capacity(count);
    let mut acc: u32 = 0;
    // start with the pad bits already "read" as zeros
    let mut bits = count * BITS_PER_WORD - bytes.len() * 8;
    let list = wordlist::words();
    for &byte in bytes {
        acc = (acc << 8) | byte as u32;
        bits += 8;
        while bits >= BITS_PER_WORD {
            bits -= BITS_PER_WORD;
            let index = (acc >> bits) & INDEX_MASK;
            out.push(list[index as usize].to_string());
            acc &= low_mask(bits);
        }
    }
    out
}

/// Decode words back into exactly `byte_len` bytes.
///
/// Each word is trimmed and lower-cased before lookup. The concatenated
/// indices form one big-endian value that is written into `byte_len`
/// bytes, zero-extended on the high side when the words carry fewer bits.
///
/// # Returns
/// The bytes, or
/// - `UnknownWord` for the first word not in the vocabulary,
/// - `MnemonicTooShort` if [`byte_capacity`] of the words is below `byte_len`,
/// - `MnemonicOverflow` if the value needs more than `byte_len` bytes.
pub fn decode<S: AsRef<str>>(words: &[S], byte_len: usize) -> Result<Vec<u8>, CertificateError> {
    let indices = words
        .iter()
        .map(|w| {
            let normalized = wordlist::normalize(w.as_ref());
            wordlist::index_of(&normalized).ok_or(CertificateError::UnknownWord(normalized))
        })
        .collect::<Result<Vec<u16>, _>>()?;

    if byte_capacity(indices.len()) < byte_len {
        return Err(CertificateError::MnemonicTooShort {
            byte_len,
            got: words.len(),
        });
    }

    let total_bits = indices.len() * BITS_PER_WORD;
    let out_bits = byte_len * 8;
    // high bits that must be zero, or zero bits to prepend
    let mut skip = total_bits.saturating_sub(out_bits);
    let mut bits = out_bits.saturating_sub(total_bits);
    let mut acc: u32 = 0;
    let mut out = Vec::with_capacity(byte_len);
    for index in indices {
        acc = (acc << BITS_PER_WORD) | index as u32;
        bits += BITS_PER_WORD;
        if skip > 0 {
            let take = skip.min(bits);
            if acc >> (bits - take) != 0 {
                return Err(CertificateError::MnemonicOverflow);
            }
            bits -= take;
            skip -= take;
            acc &= low_mask(bits);
        }
        while bits >= 8 {
            bits -= 8;
            out.push((acc >> bits) as u8);
            acc &= low_mask(bits);
        }
    }
    Ok(out)
}

fn low_mask(bits: usize) -> u32 {
    (1u32 << bits) - 1
}
