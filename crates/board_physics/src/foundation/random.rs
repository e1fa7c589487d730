//! Injectable pseudo-random sources
//!
//! Collision responses add a small random spin. The generator is passed in
//! explicitly so tests can pin the sequence.

use rand::RngCore;

/// Source of pseudo-random 32-bit values
pub trait RandomSource {
    /// Next value in the sequence
    fn next_u32(&mut self) -> u32;
}

/// Classic `rand()`-style linear congruential generator
///
/// Produces 15-bit outputs from `state = state * 1103515245 + 12345`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcgRandom {
    state: u32,
}

impl LcgRandom {
    /// Seed used by the cube demo at startup
    pub const DEFAULT_SEED: u32 = 1234;

    /// Create a generator with the given seed
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Restart the sequence from `seed`
    pub fn reseed(&mut self, seed: u32) {
        self.state = seed;
    }
}

impl Default for LcgRandom {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl RandomSource for LcgRandom {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        (self.state >> 16) & 0x7fff
    }
}

/// Adapter exposing any [`rand::RngCore`] as a [`RandomSource`]
#[derive(Debug, Clone)]
pub struct RngSource<R: RngCore>(pub R);

impl<R: RngCore> RandomSource for RngSource<R> {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// Random spin added to one angular velocity axis after a bounce
///
/// Uniform over `[-0.05, 0.049]` in steps of 0.001.
pub fn angular_jitter<S: RandomSource + ?Sized>(source: &mut S) -> f32 {
    (source.next_u32() % 100) as f32 / 1000.0 - 0.05
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    struct Fixed(u32);

    impl RandomSource for Fixed {
        fn next_u32(&mut self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_lcg_is_deterministic_and_15_bit() {
        let mut a = LcgRandom::default();
        let mut b = LcgRandom::new(LcgRandom::DEFAULT_SEED);
        for _ in 0..32 {
            let value = a.next_u32();
            assert_eq!(value, b.next_u32());
            assert!(value <= 0x7fff);
        }
    }

    #[test]
    fn test_lcg_reseed_restarts_sequence() {
        let mut rng = LcgRandom::new(7);
        let first = rng.next_u32();
        rng.next_u32();
        rng.reseed(7);
        assert_eq!(rng.next_u32(), first);
    }

    #[test]
    fn test_angular_jitter_range() {
        assert_relative_eq!(angular_jitter(&mut Fixed(50)), 0.0, epsilon = 1e-6);
        assert_relative_eq!(angular_jitter(&mut Fixed(0)), -0.05, epsilon = 1e-6);
        assert_relative_eq!(angular_jitter(&mut Fixed(199)), 0.049, epsilon = 1e-6);

        let mut rng = RngSource(StdRng::seed_from_u64(9));
        for _ in 0..100 {
            let j = angular_jitter(&mut rng);
            assert!((-0.05..0.05).contains(&j));
        }
    }
}
