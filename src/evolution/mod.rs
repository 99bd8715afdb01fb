pub mod challenge;
pub mod launcher;
pub mod options;
pub mod stop;

pub use challenge::Challenge;
pub use launcher::{EvolutionLauncher, EvolutionResult};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel};
pub use stop::{StopReason, StopToken};
