use std::fmt::Debug;

use crate::error::Result;
use crate::rng::RandomNumberGenerator;

use super::{TournamentSelection, TruncationSelection};

/// Trait for selection strategies.
///
/// Strategies work on costs only (lower is better) and return indices into the
/// population, so the caller decides whether and when to clone individuals.
///
/// # Examples
///
/// ```
/// use timetable_ga::rng::RandomNumberGenerator;
/// use timetable_ga::selection::{SelectionStrategy, TournamentSelection};
///
/// let costs = vec![4.0, 0.0, 9.0, 2.0];
/// let mut rng = RandomNumberGenerator::from_seed(11);
/// let picked = TournamentSelection::default()
///     .select(&costs, 6, &mut rng)
///     .unwrap();
///
/// assert_eq!(picked.len(), 6);
/// assert!(picked.iter().all(|&i| i < costs.len()));
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Selects `num_to_select` indices from a population described by `costs`.
    ///
    /// # Errors
    ///
    /// Returns an error if `costs` is empty and a non-zero selection is requested.
    fn select(
        &self,
        costs: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>>;
}

/// The parent-selection schemes a solver can be configured with.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum ParentSelection {
    Tournament(TournamentSelection),
    Truncation(TruncationSelection),
}

impl ParentSelection {
    /// Tournament of size `k`.
    pub fn tournament(k: usize) -> Result<Self> {
        Ok(Self::Tournament(TournamentSelection::new(k)?))
    }

    /// Uniform pairs drawn from the better half.
    pub fn top_half() -> Self {
        Self::Truncation(TruncationSelection::default())
    }
}

impl Default for ParentSelection {
    fn default() -> Self {
        Self::Tournament(TournamentSelection::default())
    }
}

impl SelectionStrategy for ParentSelection {
    fn select(
        &self,
        costs: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>> {
        match self {
            ParentSelection::Tournament(s) => s.select(costs, num_to_select, rng),
            ParentSelection::Truncation(s) => s.select(costs, num_to_select, rng),
        }
    }
}
