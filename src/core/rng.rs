//! Random sources for sampling and card synthesis.
//!
//! ## Key Types
//!
//! - `RandomSource`: The draw interface every randomized step takes
//! - `GameRng`: Seeded ChaCha8 generator, one per request
//! - `ScriptedRng`: Replays a fixed sequence of draws (tests, reproductions)
//!
//! ## Reproducing a roll
//!
//! ```
//! use commander_forge::core::{GameRng, RandomSource};
//!
//! let mut rng = GameRng::new(42);
//! let mut replay = GameRng::new(42);
//!
//! assert_eq!(rng.next_f64(), replay.next_f64());
//! assert_eq!(rng.gen_index(10), replay.gen_index(10));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of uniform draws.
///
/// Sampling and synthesis only ever ask for a float in `[0, 1)` or an index
/// below a bound, so a deterministic sequence can stand in for a real
/// generator.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `[0, bound)`.
    ///
    /// `bound` must be non-zero.
    fn gen_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "gen_index called with empty bound");
        let index = (self.next_f64() * bound as f64) as usize;
        index.min(bound.saturating_sub(1))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn gen_index(&mut self, bound: usize) -> usize {
        (**self).gen_index(bound)
    }
}

/// Seeded RNG used for every generation request.
///
/// Uses ChaCha8 for speed while keeping high quality randomness.
/// Forks give each re-roll its own stream, and `state()` captures a roll's
/// starting point so it can be replayed exactly.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from the thread-local entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seeded when a seed is given, otherwise from entropy.
    #[must_use]
    pub fn seeded_or_random(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// The seed this generator was built from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    /// Successive re-rolls under a fixed seed use one fork each.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

impl RandomSource for GameRng {
    fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn gen_index(&mut self, bound: usize) -> usize {
        self.inner.gen_range(0..bound)
    }
}

/// Serializable RNG state for reproducing a generation.
///
/// The CLI prints one per roll; `--replay` feeds it back through
/// [`GameRng::from_state`].
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}

/// Replays a fixed list of draws, wrapping around at the end.
///
/// Values are clamped into `[0, 1)` so a script can never produce an
/// out-of-range index.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    /// Create a scripted source.
    ///
    /// Panics if `values` is empty.
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty(), "ScriptedRng needs at least one value");
        Self { values, cursor: 0 }
    }

    /// Number of draws taken so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_index(1000), rng2.gen_index(1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_index(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_index(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_next_f64_in_unit_interval() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_fork_produces_different_sequence() {
        let mut rng = GameRng::new(42);
        let mut forked = rng.fork();

        let seq1: Vec<_> = (0..10).map(|_| rng.gen_index(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| forked.gen_index(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let forked1 = rng1.fork();
        let forked2 = rng2.fork();

        assert_eq!(forked1.seed(), forked2.seed());
    }

    #[test]
    fn test_state_roundtrip_resumes_sequence() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.next_f64();
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.gen_index(1000)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.gen_index(1000)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
            fork_counter: 5,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_scripted_replays_and_wraps() {
        let mut rng = ScriptedRng::new(vec![0.1, 0.9]);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(rng.next_f64(), 0.9);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn test_scripted_index_stays_in_bounds() {
        let mut rng = ScriptedRng::new(vec![0.0, 0.5, 1.0]);
        assert_eq!(rng.gen_index(4), 0);
        assert_eq!(rng.gen_index(4), 2);
        assert_eq!(rng.gen_index(4), 3);
    }

    #[test]
    fn test_seeded_or_random_honors_seed() {
        let mut a = GameRng::seeded_or_random(Some(9));
        let mut b = GameRng::new(9);
        assert_eq!(a.next_f64(), b.next_f64());
    }
}
