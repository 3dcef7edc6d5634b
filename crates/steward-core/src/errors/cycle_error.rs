/// Cycle-level failures: the only errors a governance cycle surfaces to its caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CycleError {
    #[error("a governance cycle is already running")]
    InProgress,

    #[error("cycle timed out before stage {stage}: {elapsed_ms}ms elapsed, budget {budget_ms}ms")]
    Timeout {
        stage: String,
        elapsed_ms: u64,
        budget_ms: u64,
    },

    #[error("cycle cancelled before stage {stage}")]
    Cancelled { stage: String },
}
