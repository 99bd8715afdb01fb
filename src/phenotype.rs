//! # Phenotype Trait
//!
//! The `Phenotype` trait defines the interface for candidate solutions evolved
//! by the launcher: how to build one from scratch, how to combine two of them
//! and how to perturb one.
//!
//! Operators never reach for hidden state. The read-only problem description
//! is passed in as `Context`, and all randomness comes from the supplied
//! [`RandomNumberGenerator`].
//!
//! ## Example
//!
//! ```rust
//! use timetable_ga::phenotype::Phenotype;
//! use timetable_ga::rng::RandomNumberGenerator;
//!
//! #[derive(Clone, Debug)]
//! struct Bits(Vec<bool>);
//!
//! impl Phenotype for Bits {
//!     type Context = usize;
//!
//!     fn seed(len: &usize, rng: &mut RandomNumberGenerator) -> Self {
//!         Bits((0..*len).map(|_| rng.gen_bool(0.5)).collect())
//!     }
//!
//!     fn crossover(&self, other: &Self, _len: &usize, rng: &mut RandomNumberGenerator) -> (Self, Self) {
//!         let cut = rng.gen_index(self.0.len());
//!         let mut a = self.0[..cut].to_vec();
//!         a.extend_from_slice(&other.0[cut..]);
//!         let mut b = other.0[..cut].to_vec();
//!         b.extend_from_slice(&self.0[cut..]);
//!         (Bits(a), Bits(b))
//!     }
//!
//!     fn mutate(&mut self, _len: &usize, rate: f64, rng: &mut RandomNumberGenerator) {
//!         for bit in self.0.iter_mut() {
//!             if rng.gen_bool(rate) {
//!                 *bit = !*bit;
//!             }
//!         }
//!     }
//! }
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let a = Bits::seed(&8, &mut rng);
//! let b = Bits::seed(&8, &mut rng);
//! let (child, _) = a.crossover(&b, &8, &mut rng);
//! assert_eq!(child.0.len(), 8);
//! ```

use std::fmt::Debug;

use crate::rng::RandomNumberGenerator;

/// Trait for types that represent individuals in the genetic algorithm.
///
/// Types implementing this trait must also implement `Clone`, `Debug`, `Send`, and `Sync`
/// so populations can be copied between generations and processed in parallel.
pub trait Phenotype: Clone + Debug + Send + Sync {
    /// Read-only problem description shared by every individual of a run.
    type Context: Sync;

    /// Builds a fresh individual for the initial population.
    fn seed(context: &Self::Context, rng: &mut RandomNumberGenerator) -> Self;

    /// Combines `self` with `other` into two children.
    ///
    /// Parents are never modified; children own copies of everything they inherit.
    fn crossover(
        &self,
        other: &Self,
        context: &Self::Context,
        rng: &mut RandomNumberGenerator,
    ) -> (Self, Self);

    /// Perturbs the individual in place. Each gene is redrawn with probability `rate`.
    ///
    /// A rate of zero must leave the individual unchanged.
    fn mutate(&mut self, context: &Self::Context, rate: f64, rng: &mut RandomNumberGenerator);
}
