//! Random sources for the computer opponent's tie-breaking.
//!
//! The opponent only ever needs "pick one of `len` candidates", so the
//! seam is a single method. Tests inject [`ScriptedRandom`]; reproducible
//! runs use [`SeededRandom`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use tracing::instrument;

/// Source of uniform choices among candidates.
pub trait RandomSource: Send + std::fmt::Debug {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}

/// Seeded source when `seed` is given, thread-local entropy otherwise.
#[instrument]
pub fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    }
}

/// Thread-local entropy, a fresh draw on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Deterministic source: the same seed yields the same choices.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SeededRandom {
    /// Creates a seeded source.
    #[instrument]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// Replays a fixed list of choices, each reduced modulo `len`.
///
/// Once the script runs out every pick is `0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    script: VecDeque<usize>,
}

impl ScriptedRandom {
    /// Creates a source that answers with `choices` in order.
    pub fn new(choices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: choices.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.script.pop_front().map_or(0, |choice| choice % len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SeededRandom::new(7);
        let mut b = SeededRandom::new(7);
        let left: Vec<_> = (0..16).map(|_| a.pick(9)).collect();
        let right: Vec<_> = (0..16).map(|_| b.pick(9)).collect();
        assert_eq!(left, right);
        assert!(left.iter().all(|i| *i < 9));
    }

    #[test]
    fn test_scripted_wraps_and_runs_dry() {
        let mut rng = ScriptedRandom::new([5, 1]);
        assert_eq!(rng.pick(4), 1);
        assert_eq!(rng.pick(4), 1);
        assert_eq!(rng.pick(4), 0);
    }

    #[test]
    fn test_thread_random_in_range() {
        let mut rng = ThreadRandom;
        for _ in 0..32 {
            assert!(rng.pick(3) < 3);
        }
    }
}
