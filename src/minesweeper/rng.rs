//! A seeded, reproducible PRNG: the same 32-bit seed yields the same
//! sequence of draws on any thread or run.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

pub struct GameRng(StdRng);

impl GameRng {
    pub fn from_seed(seed: u32) -> Self {
        GameRng(StdRng::seed_from_u64(seed as u64))
    }

    /// Draws a uniform value in the inclusive range `[0, max]`, via the
    /// blanket `Rng` impl over this type's own `RngCore`.
    pub fn gen_range_inclusive(&mut self, max: usize) -> usize {
        self.gen_range(0..=max)
    }
}

impl RngCore for GameRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = GameRng::from_seed(1234);
        let mut b = GameRng::from_seed(1234);
        for _ in 0..16 {
            assert_eq!(a.gen_range_inclusive(1000), b.gen_range_inclusive(1000));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = GameRng::from_seed(1);
        let mut b = GameRng::from_seed(2);
        let seq_a: Vec<usize> = (0..32).map(|_| a.gen_range_inclusive(1_000_000)).collect();
        let seq_b: Vec<usize> = (0..32).map(|_| b.gen_range_inclusive(1_000_000)).collect();
        assert_ne!(seq_a, seq_b);
    }
}
