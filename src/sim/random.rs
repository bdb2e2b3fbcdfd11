//! Injectable randomness for obstacle placement and reflex tie-breaks

use std::collections::VecDeque;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform samples in `[0, 1)`
///
/// Everything stochastic in the simulation draws through this trait so
/// tests can force exact obstacle sets and decisions.
pub trait RandomSource: fmt::Debug {
    /// Next uniform sample in `[0, 1)`
    fn next_unit(&mut self) -> f32;

    /// True with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.next_unit() < p
    }

    /// Fair coin flip
    fn coin(&mut self) -> bool {
        self.chance(0.5)
    }

    /// Uniform index in `0..len` (`len` must be non-zero)
    fn index(&mut self, len: usize) -> usize {
        ((self.next_unit() * len as f32) as usize).min(len.saturating_sub(1))
    }

    /// Uniform value in `[0, max)`
    fn range(&mut self, max: f32) -> f32 {
        self.next_unit() * max
    }
}

/// Seeded PCG generator, reproducible for a given seed
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of samples, then a fallback value forever
///
/// Used to pin obstacle generation and coin flips in tests and replays.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    samples: VecDeque<f32>,
    fallback: f32,
}

impl ScriptedRandom {
    pub fn new(samples: impl IntoIterator<Item = f32>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            fallback: 0.99,
        }
    }

    /// A source whose every draw is `value`
    pub fn constant(value: f32) -> Self {
        Self {
            samples: VecDeque::new(),
            fallback: value,
        }
    }

    pub fn with_fallback(mut self, fallback: f32) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        self.samples.pop_front().unwrap_or(self.fallback)
    }
}
