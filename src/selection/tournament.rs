use crate::error::{Result, SchedulingError};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects individuals through tournament selection.
///
/// Each pick samples `tournament_size` distinct individuals and keeps the one
/// with the lowest cost. Picks are independent, so the same individual may be
/// returned more than once.
///
/// - Smaller tournament sizes lead to more exploration (more random selection)
/// - Larger tournament sizes lead to more exploitation (more focus on the best individuals)
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy with the specified tournament size.
    ///
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(SchedulingError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament and returns the index of the winner.
    ///
    /// Ties go to the participant drawn first.
    fn run_tournament(&self, costs: &[f64], rng: &mut RandomNumberGenerator) -> usize {
        let population_size = costs.len();
        let size = self.tournament_size.min(population_size);

        // Partial Fisher-Yates: the first `size` slots become a sample without replacement.
        let mut pool: Vec<usize> = (0..population_size).collect();
        for i in 0..size {
            let j = i + rng.gen_index(population_size - i);
            pool.swap(i, j);
        }

        let mut best_idx = pool[0];
        for &idx in &pool[1..size] {
            if costs[idx] < costs[best_idx] {
                best_idx = idx;
            }
        }
        best_idx
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { tournament_size: 3 }
    }
}

impl SelectionStrategy for TournamentSelection {
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

        Ok((0..num_to_select)
            .map(|_| self.run_tournament(costs, rng))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tournament_selection() {
        let costs = vec![0.5, 0.8, 0.3, 0.9, 0.1];
        let mut rng = RandomNumberGenerator::from_seed(42);

        let selected = TournamentSelection::default()
            .select(&costs, 3, &mut rng)
            .unwrap();

        assert_eq!(selected.len(), 3);
        assert!(selected.iter().all(|&i| i < costs.len()));
    }

    #[test]
    fn test_full_size_tournament_always_picks_best() {
        let costs = vec![5.0, 3.0, 7.0, 1.0, 4.0];
        let mut rng = RandomNumberGenerator::from_seed(7);

        // Tournament size equal to (or larger than) the population is pure elitism
        let selection = TournamentSelection::new(10).unwrap();
        let selected = selection.select(&costs, 20, &mut rng).unwrap();
        assert!(selected.iter().all(|&i| i == 3));
    }

    #[test]
    fn test_size_one_never_fails() {
        let costs = vec![2.0, 1.0];
        let mut rng = RandomNumberGenerator::from_seed(1);
        let selection = TournamentSelection::new(1).unwrap();
        assert_eq!(selection.select(&costs, 50, &mut rng).unwrap().len(), 50);
    }

    #[test]
    fn test_tournament_selection_empty_population() {
        let costs: Vec<f64> = Vec::new();
        let mut rng = RandomNumberGenerator::from_seed(1);

        let result = TournamentSelection::default().select(&costs, 3, &mut rng);
        assert_eq!(result, Err(SchedulingError::EmptyPopulation));
    }

    #[test]
    fn test_tournament_selection_invalid_size() {
        assert!(TournamentSelection::new(0).is_err());
    }

    #[test]
    fn test_selection_is_reproducible() {
        let costs = vec![3.0, 1.0, 4.0, 1.5, 9.0, 2.6];
        let mut a = RandomNumberGenerator::from_seed(99);
        let mut b = RandomNumberGenerator::from_seed(99);

        let selection = TournamentSelection::default();
        assert_eq!(
            selection.select(&costs, 12, &mut a).unwrap(),
            selection.select(&costs, 12, &mut b).unwrap()
        );
    }
}
