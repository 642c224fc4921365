//! A minimal deterministic byte generator used by test fixtures (not by
//! any production path): `SHA256(counter_le64 || seed)`, incrementing the
//! counter on every call. Not a cryptographically secure RNG — it exists
//! so proof/vector fixtures have a reproducible stream of pseudo-random
//! keys and values without pulling in a general-purpose `rand` dependency.

use ark_std::vec::Vec;
use sha2::{Digest, Sha256};

pub struct BasicPrng {
    seed: [u8; 32],
    counter: u64,
}

impl BasicPrng {
    pub fn new(seed: [u8; 32]) -> Self {
        Self { seed, counter: 0 }
    }

    pub fn rand_bytes(&mut self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.counter.to_le_bytes());
        hasher.update(self.seed);
        let digest = hasher.finalize();
        self.counter += 1;

        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        out
    }

    pub fn rand_vec_bytes(&mut self, count: usize) -> Vec<[u8; 32]> {
        (0..count).map(|_| self.rand_bytes()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successive_calls_differ() {
        let mut rng = BasicPrng::new([0u8; 32]);
        let a = rng.rand_bytes();
        let b = rng.rand_bytes();
        assert_ne!(a, b);
    }

    #[test]
    fn same_seed_reproduces_the_same_stream() {
        let mut a = BasicPrng::new([7u8; 32]);
        let mut b = BasicPrng::new([7u8; 32]);
        assert_eq!(a.rand_vec_bytes(5), b.rand_vec_bytes(5));
    }
}
