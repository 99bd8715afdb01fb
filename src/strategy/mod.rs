//! # BreedStrategy
//!
//! The `BreedStrategy` trait defines the interface for strategies responsible for
//! producing the next generation from a ranked, fully evaluated population.
pub mod generational;

use std::fmt::Debug;

use crate::{
    error::Result, evolution::options::EvolutionOptions, phenotype::Phenotype,
    rng::RandomNumberGenerator,
};

/// # BreedStrategy
///
/// Implementations receive the current population sorted by ascending cost
/// together with the matching costs, and return a complete new population of
/// `evol_options.get_population_size()` individuals.
pub trait BreedStrategy<Pheno: Phenotype>
where
    Self: Debug + Send + Sync,
{
    /// Breeds the next generation.
    ///
    /// ## Errors
    ///
    /// This method can fail if:
    /// - The population is empty
    /// - `costs` does not match the population
    /// - The selection strategy cannot produce parents
    fn breed(
        &self,
        population: &[Pheno],
        costs: &[f64],
        context: &Pheno::Context,
        evol_options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Pheno>>;
}

pub use generational::GenerationalStrategy;
