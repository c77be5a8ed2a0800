//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps a seedable `StdRng` from the `rand`
//! crate and exposes the handful of draws the search needs: board coordinates,
//! population indices and the mutation roll.
//!
//! A search seeded with [`RandomNumberGenerator::from_seed`] makes the same
//! sequence of draws on every run. The annealing timer never touches the RNG,
//! so only the point in that sequence at which the threshold halves depends on
//! wall-clock time.
//!
//! ## Example
//!
//! ```rust
//! use genqueens::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let row = rng.gen_coordinate(8);
//!
//! assert!((1..=8).contains(&row));
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng` that provides the draws used by
/// the board, the breeding operators and the population.
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
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns a uniformly distributed index in `[0, upper)`.
    ///
    /// # Panics
    ///
    /// Panics if `upper` is zero.
    pub fn gen_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    /// Returns a uniformly distributed 1-indexed board coordinate in `[1, size]`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn gen_coordinate(&mut self, size: usize) -> usize {
        self.rng.gen_range(1..=size)
    }

    /// Returns a uniformly distributed integer in `[0, ceiling]`.
    pub fn gen_roll(&mut self, ceiling: usize) -> usize {
        self.rng.gen_range(0..=ceiling)
    }

    /// Draws a fresh seed, used to derive independent generators for work
    /// that runs in parallel.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.gen()
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
