//! Randomness source abstraction.
//!
//! Rolling never touches a global RNG directly: callers pass a source down
//! through the formula engine, so production uses the thread RNG while tests
//! and replays use a fixed sequence.

use rand::Rng;

/// A source of die faces.
pub trait RandomSource {
    /// Generate a random integer in `[min, max]`, inclusive on both ends.
    fn random_range(&mut self, min: i64, max: i64) -> i64;
}

/// Production source backed by `rand::thread_rng()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn random_range(&mut self, min: i64, max: i64) -> i64 {
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Deterministic source returning a provided sequence, cycling if exhausted.
///
/// Values outside the requested range are clamped so a fixture like
/// `[4, 5]` works for any die size.
#[derive(Debug, Clone)]
pub struct FixedRolls {
    values: Vec<i64>,
    index: usize,
}

impl FixedRolls {
    /// Create a source that yields `values` in order, then cycles.
    pub fn new(values: Vec<i64>) -> Self {
        Self { values, index: 0 }
    }

    /// Create a source that always yields the same face.
    pub fn constant(value: i64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for FixedRolls {
    fn random_range(&mut self, min: i64, max: i64) -> i64 {
        if self.values.is_empty() {
            return min;
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fixed_rolls_sequence_and_cycle() {
        let mut src = FixedRolls::new(vec![1, 5, 20]);
        assert_eq!(src.random_range(1, 20), 1);
        assert_eq!(src.random_range(1, 20), 5);
        assert_eq!(src.random_range(1, 20), 20);
        assert_eq!(src.random_range(1, 20), 1);
    }

    #[test]
    fn fixed_rolls_clamps_to_range() {
        let mut src = FixedRolls::constant(50);
        assert_eq!(src.random_range(1, 6), 6);
        let mut src = FixedRolls::constant(0);
        assert_eq!(src.random_range(1, 6), 1);
    }

    #[test]
    fn thread_rng_stays_in_range() {
        let mut src = ThreadRngSource;
        for _ in 0..100 {
            let face = src.random_range(1, 6);
            assert!((1..=6).contains(&face));
        }
    }
}
