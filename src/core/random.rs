//! Injectable random source
//!
//! The AI and event engines draw uniform floats in `[0, 1)` through this
//! trait instead of a global generator, so tests can script exact rolls.

use rand::{Rng, RngCore};

/// A source of uniform floats in `[0, 1)`
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform index into a collection of `len` items, `None` when empty
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let index = (self.next_f64() * len as f64).floor() as usize;
        Some(index.min(len - 1))
    }
}

impl<R: RngCore> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of rolls, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    rolls: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// An empty script replays a single `0.0`
    pub fn new(rolls: Vec<f64>) -> Self {
        let rolls = if rolls.is_empty() { vec![0.0] } else { rolls };
        Self { rolls, cursor: 0 }
    }

    /// Always returns the same roll
    pub fn constant(roll: f64) -> Self {
        Self::new(vec![roll])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_scripted_cycles() {
        let mut rng = ScriptedRandom::new(vec![0.1, 0.9]);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(rng.next_f64(), 0.9);
        assert_eq!(rng.next_f64(), 0.1);
    }

    #[test]
    fn test_empty_script_replays_zero() {
        let mut rng = ScriptedRandom::new(Vec::new());
        assert_eq!(rng.next_f64(), 0.0);
        assert_eq!(rng.next_f64(), 0.0);
        assert_eq!(rng.pick_index(3), Some(0));
    }

    #[test]
    fn test_pick_index_bounds() {
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5, 0.999]);
        assert_eq!(rng.pick_index(4), Some(0));
        assert_eq!(rng.pick_index(4), Some(2));
        assert_eq!(rng.pick_index(4), Some(3));
        assert_eq!(rng.pick_index(0), None);
    }

    #[test]
    fn test_seeded_rng_in_unit_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..1000 {
            let roll = rng.next_f64();
            assert!((0.0..1.0).contains(&roll));
        }
    }
}
