pub mod elitist;
pub mod selection_strategy;
pub mod tournament;
pub mod truncation;

pub use elitist::ElitistSelection;
pub use selection_strategy::{ParentSelection, SelectionStrategy};
pub use tournament::TournamentSelection;
pub use truncation::TruncationSelection;
