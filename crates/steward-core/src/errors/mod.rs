mod corpus_error;
mod cycle_error;
mod dedup_error;
mod signal_error;
mod steward_error;

pub use corpus_error::CorpusError;
pub use cycle_error::CycleError;
pub use dedup_error::DedupError;
pub use signal_error::SignalError;
pub use steward_error::{StewardError, StewardResult};
