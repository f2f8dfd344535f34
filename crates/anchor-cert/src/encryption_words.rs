//! Drawing the six encryption words.

use rand::rngs::OsRng;
use rand_core::{RngCore, SeedableRng};

use antelope_primitives::hash::sha256;
use antelope_primitives::PrivateKey;

use crate::mnemonic::PASSPHRASE_WORDS;
use crate::prng::Sfc32;
use crate::wordlist::{self, WORD_COUNT};

/// Draw six distinct words from `rng`.
///
/// Each draw is reduced modulo 2048; repeats are rejected and redrawn.
pub fn random_encryption_words<R: RngCore + ?Sized>(rng: &mut R) -> Vec<String> {
    let list = wordlist::words();
    let mut picked: Vec<usize> = Vec::with_capacity(PASSPHRASE_WORDS);
    while picked.len() < PASSPHRASE_WORDS {
        let index = rng.next_u32() as usize % WORD_COUNT;
        if !picked.contains(&index) {
            picked.push(index);
        }
    }
    picked.into_iter().map(|i| list[i].to_string()).collect()
}

/// Six distinct words drawn from the operating system's CSPRNG.
pub fn os_random_encryption_words() -> Vec<String> {
    random_encryption_words(&mut OsRng)
}

/// Six words derived reproducibly from a private key.
///
/// The first 16 bytes of SHA-256 over the raw key seed [`Sfc32`], which
/// then feeds [`random_encryption_words`].
pub fn deterministic_encryption_words(private_key: &PrivateKey) -> Vec<String> {
    let digest = sha256(&private_key.to_bytes()[..]);
    let mut seed = [0u8; 16];
    seed.copy_from_slice(&digest[..16]);
    let mut rng = Sfc32::from_seed(seed);
    random_encryption_words(&mut rng)
}
