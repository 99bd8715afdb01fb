//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the parameters of the generational
//! search: budget, population size, mutation rate, elitism, tournament size,
//! plateau window, parallelism threshold and logging verbosity.
//!
//! ## Example
//!
//! ```rust
//! use timetable_ga::evolution::options::{EvolutionOptions, LogLevel};
//!
//! let options = EvolutionOptions::builder()
//!     .max_generations(200)
//!     .population_size(60)
//!     .mutation_rate(0.1)
//!     .log_level(LogLevel::Minimal)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! assert_eq!(options.elite_count(), 6);
//! ```

use std::time::Duration;

use crate::error::{Result, SchedulingError};

/// Controls which `tracing` events the launcher emits.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Per-generation best cost at `info`, per-candidate costs at `debug`.
    Verbose,
    /// Per-generation best cost at `info`.
    Minimal,
    /// Warnings only.
    None,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct EvolutionOptions {
    max_generations: usize,
    population_size: usize,
    mutation_rate: f64,
    /// Share of each generation copied unchanged into the next one.
    elite_fraction: f64,
    tournament_size: usize,
    /// Generations without improvement tolerated before stopping.
    plateau_window: usize,
    /// Minimum number of items to process in parallel
    parallel_threshold: usize,
    time_limit: Option<Duration>,
    log_level: LogLevel,
}

impl EvolutionOptions {
    pub fn new(max_generations: usize, population_size: usize, mutation_rate: f64) -> Self {
        Self {
            max_generations,
            population_size,
            mutation_rate,
            ..Self::default()
        }
    }

    pub fn get_max_generations(&self) -> usize {
        self.max_generations
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_elite_fraction(&self) -> f64 {
        self.elite_fraction
    }

    pub fn get_tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn get_plateau_window(&self) -> usize {
        self.plateau_window
    }

    /// Returns the minimum number of items to process in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn get_time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Sets the generation budget.
    pub fn set_max_generations(&mut self, max_generations: usize) {
        self.max_generations = max_generations;
    }

    /// Sets the population size.
    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    /// Sets the per-gene mutation probability.
    pub fn set_mutation_rate(&mut self, mutation_rate: f64) {
        self.mutation_rate = mutation_rate;
    }

    /// Sets the parallel threshold.
    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Sets the log level.
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Number of individuals carried over unchanged each generation.
    ///
    /// Always at least one, so the best cost never gets worse between generations.
    pub fn elite_count(&self) -> usize {
        let raw = (self.population_size as f64 * self.elite_fraction).floor() as usize;
        raw.max(1).min(self.population_size)
    }

    /// Checks that the options describe a runnable search.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(SchedulingError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }
        if self.max_generations == 0 {
            return Err(SchedulingError::Configuration(
                "Number of generations cannot be zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SchedulingError::Configuration(format!(
                "Mutation rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.elite_fraction) {
            return Err(SchedulingError::Configuration(format!(
                "Elite fraction must be within [0, 1], got {}",
                self.elite_fraction
            )));
        }
        if self.tournament_size == 0 {
            return Err(SchedulingError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            max_generations: 100,
            population_size: 100,
            mutation_rate: 0.15,
            elite_fraction: 0.1,
            tournament_size: 3,
            plateau_window: 20,
            parallel_threshold: 64,
            time_limit: None,
            log_level: LogLevel::None,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Unset fields fall back to [`EvolutionOptions::default`].
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    max_generations: Option<usize>,
    population_size: Option<usize>,
    mutation_rate: Option<f64>,
    elite_fraction: Option<f64>,
    tournament_size: Option<usize>,
    plateau_window: Option<usize>,
    parallel_threshold: Option<usize>,
    time_limit: Option<Duration>,
    log_level: Option<LogLevel>,
}

impl EvolutionOptionsBuilder {
    pub fn max_generations(mut self, value: usize) -> Self {
        self.max_generations = Some(value);
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn elite_fraction(mut self, value: f64) -> Self {
        self.elite_fraction = Some(value);
        self
    }

    pub fn tournament_size(mut self, value: usize) -> Self {
        self.tournament_size = Some(value);
        self
    }

    pub fn plateau_window(mut self, value: usize) -> Self {
        self.plateau_window = Some(value);
        self
    }

    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    pub fn time_limit(mut self, value: Duration) -> Self {
        self.time_limit = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        let default = EvolutionOptions::default();
        EvolutionOptions {
            max_generations: self.max_generations.unwrap_or(default.max_generations),
            population_size: self.population_size.unwrap_or(default.population_size),
            mutation_rate: self.mutation_rate.unwrap_or(default.mutation_rate),
            elite_fraction: self.elite_fraction.unwrap_or(default.elite_fraction),
            tournament_size: self.tournament_size.unwrap_or(default.tournament_size),
            plateau_window: self.plateau_window.unwrap_or(default.plateau_window),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(default.parallel_threshold),
            time_limit: self.time_limit.or(default.time_limit),
            log_level: self.log_level.unwrap_or(default.log_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = EvolutionOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.get_plateau_window(), 20);
        assert_eq!(options.get_tournament_size(), 3);
        assert_eq!(options.elite_count(), 10);
    }

    #[test]
    fn test_elite_count_never_zero() {
        let options = EvolutionOptions::new(10, 4, 0.1);
        assert_eq!(options.elite_count(), 1);

        let options = EvolutionOptions::builder()
            .population_size(3)
            .elite_fraction(0.0)
            .build();
        assert_eq!(options.elite_count(), 1);
    }

    #[test]
    fn test_validation_errors() {
        let options = EvolutionOptions::new(100, 0, 0.1);
        match options.validate() {
            Err(SchedulingError::Configuration(msg)) => {
                assert!(msg.contains("Population size cannot be zero"))
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        assert!(EvolutionOptions::new(0, 10, 0.1).validate().is_err());
        assert!(EvolutionOptions::new(10, 10, 1.5).validate().is_err());
        assert!(EvolutionOptions::builder()
            .tournament_size(0)
            .build()
            .validate()
            .is_err());
    }

    #[test]
    fn test_builder_overrides() {
        let options = EvolutionOptions::builder()
            .plateau_window(5)
            .parallel_threshold(2)
            .time_limit(Duration::from_secs(1))
            .build();
        assert_eq!(options.get_plateau_window(), 5);
        assert_eq!(options.get_parallel_threshold(), 2);
        assert_eq!(options.get_time_limit(), Some(Duration::from_secs(1)));
        assert_eq!(options.get_population_size(), 100);
    }
}
