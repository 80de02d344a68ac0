//! Seedable randomness for the phase dwell timer.
//!
//! The dwell timer is the only nondeterministic part of a game session.
//! Everything that draws a dwell duration goes through [`DwellSource`], so
//! tests can swap in a fixed script or a seeded [`GameRng`].
//!
//! ```
//! use red_light::core::{DwellSource, GameRng};
//!
//! let mut rng1 = GameRng::new(42);
//! let mut rng2 = GameRng::new(42);
//!
//! // Same seed, same dwell sequence
//! assert_eq!(rng1.draw(1..50), rng2.draw(1..50));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::Range;

/// Source of phase dwell durations, in ticks.
///
/// Implementations must return a value inside `range` (half-open).
pub trait DwellSource {
    /// Draw a dwell duration uniformly from `range`.
    fn draw(&mut self, range: Range<i32>) -> i32;
}

impl<F> DwellSource for F
where
    F: FnMut(Range<i32>) -> i32,
{
    fn draw(&mut self, range: Range<i32>) -> i32 {
        self(range)
    }
}

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the thread RNG.
    ///
    /// The chosen seed is kept so a session can be replayed with [`GameRng::new`].
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }
}

impl DwellSource for GameRng {
    fn draw(&mut self, range: Range<i32>) -> i32 {
        self.gen_range(range)
    }
}
