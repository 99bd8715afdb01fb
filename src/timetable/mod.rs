//! # Timetable
//!
//! The scheduling domain built on top of the evolution core: slot geometry,
//! typed input records, the normalized problem, candidate schedules with their
//! operators, the cost evaluator and the [`Solver`] that runs both variants.

pub mod clock;
pub mod cost;
pub mod entry;
pub mod problem;
pub mod schedule;
pub mod slot;
pub mod solver;

pub use clock::Clock;
pub use cost::{CostBreakdown, CostEvaluator, CostWeights};
pub use entry::{DatesheetEntry, Semester, Shift, TimetableEntry};
pub use problem::{
    Activity, ActivitySpec, CrossoverKind, InstanceKey, ProblemBuilder, ProblemInstance,
    ProblemWarning, Rules, SeedingPolicy, Variant,
};
pub use schedule::{Assignment, Schedule};
pub use slot::{generate_slots, Slot, SlotId, SlotUniverse, DEFAULT_BREAK_MINUTES, WEEKDAYS};
pub use solver::{
    DatesheetConfig, ScheduledExam, ScheduledLecture, SelectionScheme, Solution, Solver,
    TimetableConfig,
};
