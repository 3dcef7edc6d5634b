//! Span definitions per governance stage: cycle, dedup, decide, execute.

/// Create a governance cycle span.
#[macro_export]
macro_rules! cycle_span {
    ($trigger:expr) => {
        $crate::tracing::info_span!("steward.cycle", trigger = %$trigger)
    };
}

/// Create a deduplication span. Extra fields follow the asset count.
#[macro_export]
macro_rules! dedup_span {
    ($asset_count:expr $(, $($fields:tt)+)?) => {
        $crate::tracing::info_span!("steward.dedup", assets = $asset_count $(, $($fields)+)?)
    };
}

/// Create a decision span.
#[macro_export]
macro_rules! decide_span {
    ($trigger:expr) => {
        $crate::tracing::info_span!("steward.decide", trigger = %$trigger)
    };
}

/// Create an execution span.
#[macro_export]
macro_rules! execute_span {
    ($decision_count:expr $(, $($fields:tt)+)?) => {
        $crate::tracing::info_span!("steward.execute", decisions = $decision_count $(, $($fields)+)?)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const CYCLE: &str = "steward.cycle";
    pub const DEDUP: &str = "steward.dedup";
    pub const DECIDE: &str = "steward.decide";
    pub const EXECUTE: &str = "steward.execute";
}
