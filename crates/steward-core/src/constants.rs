/// Version tag of the confidence/severity scoring tables.
/// Bump whenever a formula in the decision engine changes.
pub const SCORING_VERSION: &str = "v1";

/// Confidence assigned to a byte-identical (post-normalization) duplicate.
pub const EXACT_MATCH_SIMILARITY: f64 = 1.0;

/// Metadata key that marks an asset as quarantined by the corpus.
pub const QUARANTINED_METADATA_KEY: &str = "quarantined";

/// Metadata key carrying a corpus-side quality score.
pub const QUALITY_SCORE_METADATA_KEY: &str = "quality_score";

/// Number of recent cycles considered when computing the health trend.
pub const TREND_WINDOW: usize = 5;

/// Health delta beyond which the trend counts as improving or degrading.
pub const TREND_DELTA: f64 = 0.05;
