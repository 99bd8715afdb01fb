//! # GenerationalStrategy
//!
//! Elitist generational replacement: the elite slice of the ranked population
//! survives unchanged, the rest of the new population is filled with mutated
//! children of parents picked by the configured [`SelectionStrategy`].
use rayon::prelude::*;
use tracing::debug;

use super::BreedStrategy;
use crate::{
    error::{Result, SchedulingError},
    evolution::options::{EvolutionOptions, LogLevel},
    phenotype::Phenotype,
    rng::RandomNumberGenerator,
    selection::{ElitistSelection, SelectionStrategy},
};

#[derive(Debug, Clone)]
pub struct GenerationalStrategy<S> {
    selection: S,
}

impl<S> GenerationalStrategy<S>
where
    S: SelectionStrategy,
{
    pub fn new(selection: S) -> Self {
        Self { selection }
    }

    pub fn selection(&self) -> &S {
        &self.selection
    }
}

impl<S> Default for GenerationalStrategy<S>
where
    S: SelectionStrategy + Default,
{
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<Pheno, S> BreedStrategy<Pheno> for GenerationalStrategy<S>
where
    Pheno: Phenotype,
    S: SelectionStrategy,
{
    /// Breeds the next generation.
    ///
    /// ## Performance
    ///
    /// Parent indices and one forked generator per pair are drawn sequentially
    /// from `rng`. Crossover and mutation then run in parallel when the number
    /// of pairs reaches the parallel threshold. Because every pair owns its
    /// generator, the result is the same either way for a given seed.
    fn breed(
        &self,
        population: &[Pheno],
        costs: &[f64],
        context: &Pheno::Context,
        evol_options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Pheno>> {
        if population.is_empty() {
            return Err(SchedulingError::EmptyPopulation);
        }
        if costs.len() != population.len() {
            return Err(SchedulingError::Selection(format!(
                "Cost vector length ({}) doesn't match population length ({})",
                costs.len(),
                population.len()
            )));
        }

        let target = evol_options.get_population_size();
        let mut next = Vec::with_capacity(target);

        let elites = ElitistSelection.select(costs, evol_options.elite_count(), rng)?;
        next.extend(elites.iter().map(|&i| population[i].clone()));

        let remaining = target.saturating_sub(next.len());
        if remaining == 0 {
            return Ok(next);
        }

        let num_pairs = remaining.div_ceil(2);
        let parents = self.selection.select(costs, num_pairs * 2, rng)?;
        if parents.len() < num_pairs * 2 {
            return Err(SchedulingError::Selection(format!(
                "Selection returned {} parents, {} required",
                parents.len(),
                num_pairs * 2
            )));
        }

        let jobs: Vec<(usize, usize, RandomNumberGenerator)> = parents
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1], rng.fork()))
            .collect();

        let rate = evol_options.get_mutation_rate();
        let reproduce = |(a, b, mut local): (usize, usize, RandomNumberGenerator)| {
            let (mut first, mut second) = population[a].crossover(&population[b], context, &mut local);
            first.mutate(context, rate, &mut local);
            second.mutate(context, rate, &mut local);
            [first, second]
        };

        let children: Vec<Pheno> = if jobs.len() >= evol_options.get_parallel_threshold() {
            jobs.into_par_iter().flat_map_iter(reproduce).collect()
        } else {
            jobs.into_iter().flat_map(reproduce).collect()
        };

        if evol_options.get_log_level() == LogLevel::Verbose {
            debug!(
                elites = elites.len(),
                children = remaining,
                "bred next generation"
            );
        }

        next.extend(children.into_iter().take(remaining));
        Ok(next)
    }
}
