//! Short random identifiers for todos.
//!
//! Ids are [`DEFAULT_ID_LENGTH`] characters drawn from `[a-zA-Z0-9]`. The
//! generator is a plain value: production code seeds it from the thread RNG,
//! tests seed it with a fixed number to get a reproducible sequence.
//!
//! Nothing here guarantees uniqueness. The service checks new ids against the
//! store and draws again on a clash.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const DEFAULT_ID_LENGTH: usize = 6;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone)]
pub struct IdGenerator {
    rng: ChaCha8Rng,
}

impl IdGenerator {
    /// Generator seeded from the thread-local RNG.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    /// Generator that yields the same ids for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn generate(&mut self) -> String {
        (0..DEFAULT_ID_LENGTH)
            .map(|_| char::from(ALPHABET[self.rng.random_range(0..ALPHABET.len())]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_have_fixed_length() {
        let mut ids = IdGenerator::from_entropy();
        for _ in 0..50 {
            assert_eq!(ids.generate().len(), DEFAULT_ID_LENGTH);
        }
    }

    #[test]
    fn test_ids_are_alphanumeric() {
        let mut ids = IdGenerator::seeded(7);
        for _ in 0..200 {
            assert!(ids.generate().chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = IdGenerator::seeded(42);
        let mut b = IdGenerator::seeded(42);
        let first: Vec<_> = (0..5).map(|_| a.generate()).collect();
        let second: Vec<_> = (0..5).map(|_| b.generate()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = IdGenerator::seeded(1);
        let mut b = IdGenerator::seeded(2);
        assert_ne!(a.generate(), b.generate());
    }
}
