use std::time::{Duration, Instant};

/** criterion polled by the solvers at their safe checkpoints
(between top-level vertex iterations for branch-and-bound, between cycles for
the ant colony). The solvers have no internal timeout awareness beyond these
polls; a phase in flight always runs to completion. */
pub trait StoppingCriterion {
    /// returns true iff the search should stop
    fn is_finished(&self) -> bool;
}

/// never stops the search (run to natural termination)
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStopping;

impl StoppingCriterion for NeverStopping {
    fn is_finished(&self) -> bool { false }
}

/// stops the search after a wall-clock time budget
#[derive(Debug, Clone)]
pub struct TimeStopping {
    /// instant at which the criterion was created
    started: Instant,
    /// time budget
    budget: Duration,
}

impl TimeStopping {
    /// creates a time stopping criterion from a budget in seconds
    pub fn new(seconds:f32) -> Self {
        Self {
            started: Instant::now(),
            budget: Duration::from_secs_f32(seconds.max(0.)),
        }
    }
}

impl StoppingCriterion for TimeStopping {
    fn is_finished(&self) -> bool {
        self.started.elapsed() >= self.budget
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_stopping() {
        assert!(!NeverStopping.is_finished());
    }

    #[test]
    fn test_zero_budget_is_finished() {
        let criterion = TimeStopping::new(0.);
        assert!(criterion.is_finished());
    }

    #[test]
    fn test_large_budget_is_not_finished() {
        let criterion = TimeStopping::new(3600.);
        assert!(!criterion.is_finished());
    }
}
