use crate::error::{Result, SchedulingError};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects the best individuals based on cost.
///
/// Individuals are ranked by ascending cost (ties keep population order) and
/// the first `num_to_select` are returned. No randomness is involved.
///
/// # Examples
///
/// ```
/// use timetable_ga::rng::RandomNumberGenerator;
/// use timetable_ga::selection::{ElitistSelection, SelectionStrategy};
///
/// let costs = vec![0.5, 0.8, 0.3];
/// let mut rng = RandomNumberGenerator::from_seed(0);
/// let selected = ElitistSelection.select(&costs, 2, &mut rng).unwrap();
///
/// assert_eq!(selected, vec![2, 0]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElitistSelection;

impl SelectionStrategy for ElitistSelection {
    fn select(
        &self,
        costs: &[f64],
        num_to_select: usize,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>> {
        if num_to_select == 0 {
            return Ok(Vec::new());
        }
        if costs.is_empty() {
            return Err(SchedulingError::EmptyPopulation);
        }

        let mut ranked: Vec<usize> = (0..costs.len()).collect();
        ranked.sort_by(|&a, &b| costs[a].total_cmp(&costs[b]));
        ranked.truncate(num_to_select);
        Ok(ranked)
    }
}
