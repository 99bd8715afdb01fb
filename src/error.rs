//! # Error Types
//!
//! This module defines the error type shared by the evolution core and the
//! scheduling domain. Configuration and empty-problem errors are raised before
//! any generation runs; once a search has started it always produces a
//! best-effort result.
//!
//! ## Examples
//!
//! ```rust
//! use timetable_ga::error::{OptionExt, Result, SchedulingError};
//!
//! fn cheapest(costs: &[u64]) -> Result<u64> {
//!     costs.iter().min().copied().ok_or_else_sched(|| SchedulingError::EmptyPopulation)
//! }
//!
//! assert!(cheapest(&[]).is_err());
//! assert_eq!(cheapest(&[3, 1, 2]).unwrap(), 1);
//! ```

use thiserror::Error;

/// Represents errors that can occur while building or searching a schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    /// Invalid configuration, including slot geometry that yields no slots.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No activities were left to schedule.
    #[error("Empty problem: no activities to schedule")]
    EmptyProblem,

    /// An entry is missing a required field.
    #[error("Malformed entry #{index}: missing required field '{field}'")]
    MalformedEntry { index: usize, field: &'static str },

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// A selection strategy could not produce parents.
    #[error("Selection error: {0}")]
    Selection(String),

    /// Error that occurs when NaN or infinity values are encountered.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),
}

/// A specialized Result type for scheduling operations.
pub type Result<T> = std::result::Result<T, SchedulingError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, SchedulingError>` using
    /// a closure to generate the error.
    fn ok_or_else_sched<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> SchedulingError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_sched<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> SchedulingError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SchedulingError::MalformedEntry {
            index: 3,
            field: "room",
        };
        assert_eq!(
            err.to_string(),
            "Malformed entry #3: missing required field 'room'"
        );

        let err = SchedulingError::Configuration("no slots".to_string());
        assert!(err.to_string().contains("no slots"));
    }

    #[test]
    fn test_option_ext() {
        let none: Option<i32> = None;
        assert_eq!(
            none.ok_or_else_sched(|| SchedulingError::EmptyProblem),
            Err(SchedulingError::EmptyProblem)
        );
        assert_eq!(Some(4).ok_or_else_sched(|| SchedulingError::EmptyProblem), Ok(4));
    }
}
