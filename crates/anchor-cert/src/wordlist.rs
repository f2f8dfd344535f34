//! The 2048-word vocabulary.
//!
//! This is the BIP-39 English list: sorted, pairwise distinct and fixed
//! for the life of the process. A word's position is its 11-bit value.

use bip39::Language;

/// Number of words in the vocabulary.
pub const WORD_COUNT: usize = 2048;

/// Bits carried by one word.
pub const BITS_PER_WORD: usize = 11;

/// The full vocabulary in index order.
pub fn words() -> &'static [&'static str; WORD_COUNT] {
    Language::English.word_list()
}

/// The word at `index`, if `index < 2048`.
pub fn word(index: u16) -> Option<&'static str> {
    words().get(index as usize).copied()
}

/// Index of an exact (already normalized) word.
pub fn index_of(word: &str) -> Option<u16> {
    Language::English.find_word(word)
}

/// Trim surrounding whitespace and lower-case.
pub fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_shape() {
        let list = words();
        assert_eq!(list.len(), WORD_COUNT);
        assert_eq!(list[0], "abandon");
        assert_eq!(list[2047], "zoo");
        assert!(list.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(index_of("pepper"), Some(1303));
        assert_eq!(index_of("exchange"), Some(629));
        assert_eq!(word(1630), Some("slim"));
        assert_eq!(word(2048), None);
        assert_eq!(index_of("pancetta"), None);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Pepper\n"), "pepper");
        assert_eq!(index_of(&normalize("CRAFT")), Some(400));
    }
}
