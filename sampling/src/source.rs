use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use rand_core::RngCore;

const MAXF64: f64 = 9007199254740992.0;

/// Deterministic source of transform inputs.
///
/// Seeded explicitly so that failing test vectors can be replayed.
pub struct Source {
    source: ChaCha8Rng,
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    pub fn branch(&mut self) -> Self {
        let mut seed: [u8; 32] = [0u8; 32];
        self.fill_bytes(&mut seed);
        Source::new(seed)
    }

    /// Returns a uniform value in [0, max) by rejection on `mask`.
    #[inline(always)]
    pub fn next_u64n(&mut self, max: u64, mask: u64) -> u64 {
        let mut x: u64 = self.next_u64() & mask;
        while x >= max {
            x = self.next_u64() & mask;
        }
        x
    }

    /// Returns a uniform residue modulo `q`.
    #[inline(always)]
    pub fn next_residue(&mut self, q: u64) -> u64 {
        debug_assert!(q != 0, "invalid argument q=0");
        let mask: u64 = u64::MAX >> (q - 1).leading_zeros().min(63);
        self.next_u64n(q, mask)
    }

    #[inline(always)]
    pub fn next_f64(&mut self, min: f64, max: f64) -> f64 {
        min + ((self.next_u64() << 11 >> 11) as f64) / MAXF64 * (max - min)
    }

    /// Returns `n` uniform residues modulo `q`.
    pub fn residues(&mut self, n: usize, q: u64) -> Vec<u64> {
        (0..n).map(|_| self.next_residue(q)).collect()
    }

    /// Returns `n` uniform reals in [min, max).
    pub fn reals(&mut self, n: usize, min: f64, max: f64) -> Vec<f64> {
        (0..n).map(|_| self.next_f64(min, max)).collect()
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}
