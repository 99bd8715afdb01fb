//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single injectable random source
//! of a search. Every stochastic choice (seeding, parent draws, cut points,
//! mutation coins) goes through it, so a run is reproducible from its seed.
//!
//! ## Example
//!
//! ```rust
//! use timetable_ga::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let idx = rng.gen_index(10);
//! assert!(idx < 10);
//! ```
//!
//! ## Partitioning across workers
//!
//! Parallel stages never share a generator. Instead the master generator
//! hands out child generators with [`RandomNumberGenerator::fork`], in a fixed
//! sequential order, before the parallel work starts.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible runs and tests.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Derives an independent generator from this one.
    ///
    /// Consumes one draw from `self`, so the sequence of forks is itself
    /// deterministic under a fixed seed.
    pub fn fork(&mut self) -> Self {
        Self::from_seed(self.rng.gen::<u64>())
    }

    /// Returns a uniformly drawn index in `0..len`.
    ///
    /// `len` must be non-zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "gen_index called with an empty range");
        self.rng.gen_range(0..len)
    }

    /// Returns `true` with probability `p`. Values outside `[0, 1]` are clamped.
    pub fn gen_bool(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.rng.gen_bool(p)
    }

    /// Picks a uniformly random element of `items`, or `None` when it is empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.gen_index(items.len())])
        }
    }

    /// Draws two distinct indices in `0..len`, or the same index twice when `len == 1`.
    pub fn gen_distinct_pair(&mut self, len: usize) -> (usize, usize) {
        let first = self.gen_index(len);
        if len < 2 {
            return (first, first);
        }
        let mut second = self.gen_index(len - 1);
        if second >= first {
            second += 1;
        }
        (first, second)
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
