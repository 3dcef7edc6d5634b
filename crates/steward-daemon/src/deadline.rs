//! Stage deadline: a cycle checks its budget and cancellation before each stage.

use std::time::{Duration, Instant};

use steward_core::errors::CycleError;

use crate::cancellation::CancellationToken;

pub struct StageDeadline<'a> {
    started: Instant,
    budget: Duration,
    cancel: &'a CancellationToken,
}

impl<'a> StageDeadline<'a> {
    pub fn new(budget: Duration, cancel: &'a CancellationToken) -> Self {
        Self {
            started: Instant::now(),
            budget,
            cancel,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Fails when cancelled or when the budget is spent; `stage` is the one about to start.
    pub fn check(&self, stage: &str) -> Result<(), CycleError> {
        if self.cancel.is_cancelled() {
            return Err(CycleError::Cancelled {
                stage: stage.to_string(),
            });
        }
        let elapsed = self.elapsed();
        if elapsed > self.budget {
            return Err(CycleError::Timeout {
                stage: stage.to_string(),
                elapsed_ms: self.elapsed_ms(),
                budget_ms: u64::try_from(self.budget.as_millis()).unwrap_or(u64::MAX),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_wins_over_budget() {
        let token = CancellationToken::new();
        let deadline = StageDeadline::new(Duration::from_secs(60), &token);
        assert!(deadline.check("load").is_ok());
        token.cancel();
        assert_eq!(
            deadline.check("dedup"),
            Err(CycleError::Cancelled {
                stage: "dedup".into()
            })
        );
    }

    #[test]
    fn spent_budget_times_out() {
        let token = CancellationToken::new();
        let deadline = StageDeadline::new(Duration::ZERO, &token);
        std::thread::sleep(Duration::from_millis(2));
        assert!(matches!(
            deadline.check("decide"),
            Err(CycleError::Timeout { ref stage, budget_ms: 0, .. }) if stage == "decide"
        ));
    }
}
