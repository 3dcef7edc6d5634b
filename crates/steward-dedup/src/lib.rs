//! # steward-dedup
//!
//! Duplicate detection: fingerprint → exact grouping → semantic similarity (union-find)
//! → retention. [`DeduplicationPipeline`] ties the stages together and emits a
//! [`steward_core::DuplicateReport`].

pub mod exact;
pub mod fingerprint;
pub mod pipeline;
pub mod retention;
pub mod semantic;
pub mod similarity;

pub use exact::{ExactDetection, ExactDuplicateDetector, ExactGroup};
pub use fingerprint::{ContentFingerprinter, Fingerprint};
pub use pipeline::DeduplicationPipeline;
pub use retention::RetentionResolver;
pub use semantic::{SemanticDetection, SemanticDuplicateDetector, SimilarPair};
