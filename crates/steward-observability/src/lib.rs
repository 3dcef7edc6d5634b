//! # steward-observability
//!
//! Tracing subscriber setup, span definitions for each governance stage, and
//! structured events for cycle, decision and alert activity.

pub mod tracing_setup;

pub use tracing_setup::{build_filter, init_tracing, init_tracing_with_filter};

#[doc(hidden)]
pub use tracing;
