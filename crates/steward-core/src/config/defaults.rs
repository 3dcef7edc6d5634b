// Single source of truth for all default values.

// --- Dedup ---
pub const DEFAULT_SEMANTIC_ENABLED: bool = true;
pub const DEFAULT_SEMANTIC_THRESHOLD: f64 = 0.95;
pub const DEFAULT_WORKER_THREADS: usize = 0; // 0 = rayon default
pub const DEFAULT_NORMALIZE_WHITESPACE: bool = true;

// --- Decision ---
pub const DEFAULT_SUPPRESSION_WINDOW_SECS: u64 = 3600; // 1 hour
pub const DEFAULT_STALE_REVIEW_MIN: usize = 5;
pub const DEFAULT_QUALITY_FLOOR: f64 = 0.3;
pub const DEFAULT_LARGE_BATCH_THRESHOLD: usize = 10;
pub const DEFAULT_MEDIUM_BATCH_THRESHOLD: usize = 3;

// --- Daemon ---
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 3600; // 1 hour
pub const DEFAULT_TICK_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_EVENT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_MIN_RUN_INTERVAL_SECS: u64 = 21_600; // 6 hours
pub const DEFAULT_DEGRADED_RUN_INTERVAL_SECS: u64 = 3600; // 1 hour
pub const DEFAULT_DEGRADED_HEALTH_THRESHOLD: f64 = 0.6;
pub const DEFAULT_SEARCH_MIN_QUALITY: f64 = 0.3;
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

// --- Freshness ---
pub const DEFAULT_TTL_DAYS: u32 = 30;
pub const DEFAULT_LONG_TERM_REVIEW_DAYS: u32 = 90;
pub const DEFAULT_WEB_CACHE_TTL_DAYS: u32 = 7;
pub const DEFAULT_STALE_THRESHOLD_DAYS: u32 = 180;

// --- Validation ---
pub const DEFAULT_MIN_CONTENT_LENGTH: usize = 20;
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 5_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
