use std::marker::PhantomData;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use super::{
    challenge::Challenge,
    options::{EvolutionOptions, LogLevel},
    stop::{StopReason, StopToken},
};
use crate::{
    error::{OptionExt, Result, SchedulingError},
    phenotype::Phenotype,
    rng::RandomNumberGenerator,
    strategy::BreedStrategy,
};

/// Represents the result of an evolution: the best individual seen during the
/// whole run, not merely the best of the last generation.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult<Pheno: Phenotype> {
    /// The best phenotype found.
    pub pheno: Pheno,
    /// Its cost.
    pub score: f64,
    /// Generation in which `pheno` was first seen.
    pub generation: usize,
    /// Number of generations evaluated.
    pub generations_run: usize,
    pub stop_reason: StopReason,
    /// Best cost of every evaluated generation, in order.
    pub history: Vec<f64>,
}

/// Runs the generational search:
/// INIT, then EVALUATE and CHECK_TERMINATION, then SELECT, REPRODUCE and
/// MUTATE via the breed strategy, looping back to EVALUATE.
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<Pheno, Strategy, Chall>
where
    Pheno: Phenotype,
    Chall: Challenge<Pheno>,
    Strategy: BreedStrategy<Pheno>,
{
    strategy: Strategy,
    challenge: Chall,
    stop_token: Option<StopToken>,
    _marker: PhantomData<Pheno>,
}

impl<Pheno, Strategy, Chall> EvolutionLauncher<Pheno, Strategy, Chall>
where
    Pheno: Phenotype,
    Chall: Challenge<Pheno> + Sync,
    Strategy: BreedStrategy<Pheno>,
{
    /// Creates a new `EvolutionLauncher` instance with the specified breeding strategy and challenge.
    pub fn new(strategy: Strategy, challenge: Chall) -> Self {
        Self {
            strategy,
            challenge,
            stop_token: None,
            _marker: PhantomData,
        }
    }

    /// Lets a caller cancel the run between generations.
    pub fn with_stop_token(mut self, token: StopToken) -> Self {
        self.stop_token = Some(token);
        self
    }

    pub fn challenge(&self) -> &Chall {
        &self.challenge
    }

    /// Evolves a population over multiple generations and returns the best individual seen.
    ///
    /// # Errors
    ///
    /// Only invalid options fail, and they fail before the initial population
    /// is built. A run that never reaches cost zero is not an error.
    ///
    /// # Performance
    ///
    /// Seeding and cost evaluation run on Rayon's pool once the population
    /// reaches the parallel threshold. Each seeded individual gets a generator
    /// forked from `rng` beforehand, so the outcome does not depend on the
    /// threshold.
    pub fn evolve(
        &self,
        options: &EvolutionOptions,
        context: &Pheno::Context,
        rng: &mut RandomNumberGenerator,
    ) -> Result<EvolutionResult<Pheno>> {
        options.validate()?;

        let started = Instant::now();
        let log_level = options.get_log_level();

        let mut population = self.initial_population(options, context, rng);
        let mut best: Option<(Pheno, f64, usize)> = None;
        let mut stalled = 0usize;
        let mut history = Vec::with_capacity(options.get_max_generations());
        let mut generation = 0usize;

        let stop_reason = loop {
            let (ranked, costs) = self.evaluate(population, context, options)?;
            let current = costs[0];
            history.push(current);

            match &best {
                Some((_, best_score, _)) if current >= *best_score => stalled += 1,
                _ => {
                    best = Some((ranked[0].clone(), current, generation));
                    stalled = 0;
                }
            }

            match log_level {
                LogLevel::Minimal | LogLevel::Verbose => {
                    info!(generation, best = current, stalled, "generation evaluated")
                }
                LogLevel::None => {}
            }

            if current == 0.0 {
                break StopReason::Perfect;
            }
            if stalled > options.get_plateau_window() {
                break StopReason::Plateau;
            }
            if generation + 1 >= options.get_max_generations() {
                break StopReason::MaxGenerations;
            }
            if self.stop_token.as_ref().is_some_and(StopToken::is_set) {
                break StopReason::Cancelled;
            }
            if options
                .get_time_limit()
                .is_some_and(|limit| started.elapsed() >= limit)
            {
                break StopReason::TimeLimit;
            }

            population = self
                .strategy
                .breed(&ranked, &costs, context, options, rng)?;
            generation += 1;
        };

        let (pheno, score, found_in) = best.ok_or_else_sched(|| {
            SchedulingError::EmptyPopulation
        })?;

        if log_level != LogLevel::None {
            info!(
                best = score,
                found_in,
                generations = generation + 1,
                reason = %stop_reason,
                "evolution finished"
            );
        }

        Ok(EvolutionResult {
            pheno,
            score,
            generation: found_in,
            generations_run: generation + 1,
            stop_reason,
            history,
        })
    }

    fn initial_population(
        &self,
        options: &EvolutionOptions,
        context: &Pheno::Context,
        rng: &mut RandomNumberGenerator,
    ) -> Vec<Pheno> {
        let size = options.get_population_size();
        let seeds: Vec<RandomNumberGenerator> = (0..size).map(|_| rng.fork()).collect();

        if size >= options.get_parallel_threshold() {
            seeds
                .into_par_iter()
                .map(|mut local| Pheno::seed(context, &mut local))
                .collect()
        } else {
            seeds
                .into_iter()
                .map(|mut local| Pheno::seed(context, &mut local))
                .collect()
        }
    }

    /// Scores every candidate and returns the population sorted by ascending cost.
    ///
    /// The sort is stable, so candidates with equal cost keep their order.
    fn evaluate(
        &self,
        population: Vec<Pheno>,
        context: &Pheno::Context,
        options: &EvolutionOptions,
    ) -> Result<(Vec<Pheno>, Vec<f64>)> {
        if population.is_empty() {
            return Err(SchedulingError::EmptyPopulation);
        }

        let costs: Vec<f64> = if population.len() >= options.get_parallel_threshold() {
            population
                .par_iter()
                .map(|candidate| self.challenge.score(candidate, context))
                .collect()
        } else {
            population
                .iter()
                .map(|candidate| self.challenge.score(candidate, context))
                .collect()
        };

        if let Some(bad) = costs.iter().find(|c| !c.is_finite() || **c < 0.0) {
            return Err(SchedulingError::InvalidNumericValue(format!(
                "Cost must be finite and non-negative, got {}",
                bad
            )));
        }

        let mut scored: Vec<(Pheno, f64)> = population.into_iter().zip(costs).collect();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));

        if options.get_log_level() == LogLevel::Verbose {
            for (rank, (_, cost)) in scored.iter().enumerate() {
                debug!(rank, cost, "candidate");
            }
        }

        Ok(scored.into_iter().unzip())
    }
}
