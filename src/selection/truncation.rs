use crate::error::{Result, SchedulingError};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// Truncation ("top-half") selection.
///
/// Only the best `fraction` of the population is eligible. Indices are drawn
/// in pairs of two distinct members of that pool, which keeps crossover from
/// mating an individual with itself whenever the pool allows it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TruncationSelection {
    fraction: f64,
}

impl TruncationSelection {
    /// # Errors
    ///
    /// Returns an error unless `0 < fraction <= 1`.
    pub fn new(fraction: f64) -> Result<Self> {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(SchedulingError::Configuration(format!(
                "Truncation fraction must be within (0, 1], got {}",
                fraction
            )));
        }
        Ok(Self { fraction })
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    fn pool_size(&self, population_size: usize) -> usize {
        ((population_size as f64 * self.fraction).floor() as usize).clamp(1, population_size)
    }
}

impl Default for TruncationSelection {
    fn default() -> Self {
        Self { fraction: 0.5 }
    }
}

impl SelectionStrategy for TruncationSelection {
    fn select(
        &self,
        costs: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>> {
        if num_to_select == 0 {
            return Ok(Vec::new());
        }
        if costs.is_empty() {
            return Err(SchedulingError::EmptyPopulation);
        }

        let mut ranked: Vec<usize> = (0..costs.len()).collect();
        ranked.sort_by(|&a, &b| costs[a].total_cmp(&costs[b]));
        ranked.truncate(self.pool_size(costs.len()));

        let mut selected = Vec::with_capacity(num_to_select);
        while selected.len() < num_to_select {
            let (a, b) = rng.gen_distinct_pair(ranked.len());
            selected.push(ranked[a]);
            if selected.len() < num_to_select {
                selected.push(ranked[b]);
            }
        }
        Ok(selected)
    }
}
