pub mod error;
pub mod evolution;
pub mod phenotype;
pub mod rng;
pub mod selection;
pub mod strategy;
pub mod timetable;

// Re-export commonly used types for convenience
pub use error::{OptionExt, Result, SchedulingError};
pub use timetable::{DatesheetConfig, Solution, Solver, TimetableConfig};
