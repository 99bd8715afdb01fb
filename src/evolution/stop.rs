use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering::Relaxed};
use std::sync::Arc;

/// Cooperative cancellation flag shared between a caller and a running search.
///
/// The launcher only looks at it between generations.
#[derive(Clone, Default, Debug)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Relaxed)
    }

    pub fn request_stop(&self) {
        self.0.store(true, Relaxed)
    }
}

impl PartialEq for StopToken {
    /// Equality is based on identity (same underlying Arc), not current value.
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for StopToken {}

/// Why a search stopped.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The best individual reached cost zero.
    Perfect,
    /// The best cost did not improve for longer than the plateau window.
    Plateau,
    /// The generation budget was used up.
    MaxGenerations,
    /// A [`StopToken`] was set.
    Cancelled,
    /// The wall-clock budget ran out.
    TimeLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StopReason::Perfect => "perfect schedule found",
            StopReason::Plateau => "no improvement within plateau window",
            StopReason::MaxGenerations => "generation budget exhausted",
            StopReason::Cancelled => "cancelled",
            StopReason::TimeLimit => "time limit reached",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_token_identity_and_behavior() {
        let a = StopToken::new();
        let b = a.clone();
        let c = StopToken::new();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(!a.is_set());

        b.request_stop();
        assert!(a.is_set());
        assert!(!c.is_set());
    }

    #[test]
    fn stop_reason_display() {
        assert_eq!(StopReason::Cancelled.to_string(), "cancelled");
        assert!(StopReason::Plateau.to_string().contains("plateau"));
    }
}
