//! `sfc32`, a small seeded generator.
//!
//! Used only to derive encryption words reproducibly from a private key,
//! so the output sequence must stay bit-exact. Not a CSPRNG on its own.

use rand_core::{impls, Error, RngCore, SeedableRng};

/// Chris Doty-Humphrey's Small Fast Counting generator, 32-bit variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sfc32 {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
}

impl Sfc32 {
    /// Seed with four 32-bit words. No warm-up rounds are run.
    pub fn new(a: u32, b: u32, c: u32, d: u32) -> Self {
        Sfc32 { a, b, c, d }
    }

    fn step(&mut self) -> u32 {
        let t = self.a.wrapping_add(self.b).wrapping_add(self.d);
        self.d = self.d.wrapping_add(1);
        self.a = self.b ^ (self.b >> 9);
        self.b = self.c.wrapping_add(self.c << 3);
        self.c = self.c.rotate_left(21).wrapping_add(t);
        t
    }
}

impl SeedableRng for Sfc32 {
    type Seed = [u8; 16];

    /// The seed is read as four little-endian `u32`s `(a, b, c, d)`.
    fn from_seed(seed: Self::Seed) -> Self {
        let mut words = [0u32; 4];
        for (word, chunk) in words.iter_mut().zip(seed.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Sfc32::new(words[0], words[1], words[2], words[3])
    }
}

impl RngCore for Sfc32 {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
