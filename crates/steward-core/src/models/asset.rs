use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{QUALITY_SCORE_METADATA_KEY, QUARANTINED_METADATA_KEY};

/// Kind of governed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Document,
    Chunk,
    ChatHistory,
    Memory,
    WebCache,
    Session,
}

impl SourceType {
    pub const ALL: [SourceType; 6] = [
        Self::Document,
        Self::Chunk,
        Self::ChatHistory,
        Self::Memory,
        Self::WebCache,
        Self::Session,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Chunk => "chunk",
            Self::ChatHistory => "chat_history",
            Self::Memory => "memory",
            Self::WebCache => "web_cache",
            Self::Session => "session",
        }
    }

    /// Short-lived content that expires rather than goes stale.
    pub fn is_short_term(&self) -> bool {
        matches!(self, Self::ChatHistory | Self::Session)
    }
}

/// A unit of governed content, as read from the corpus.
///
/// Assets are snapshots: the governance core never mutates one in place.
/// Changes go through the corpus accessor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub content: String,
    /// Corpus-side blake3 hash of the raw content.
    pub content_hash: String,
    /// Pre-computed embedding, if the corpus has one.
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    pub source_type: SourceType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    /// Build an asset with no embedding and no metadata. `updated_at` starts at `created_at`.
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        source_type: SourceType,
        created_at: DateTime<Utc>,
    ) -> Self {
        let content = content.into();
        Self {
            id: id.into(),
            content_hash: Self::compute_content_hash(&content),
            content,
            embedding: None,
            metadata: BTreeMap::new(),
            source_type,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    /// blake3 hex digest of the raw content bytes.
    pub fn compute_content_hash(content: &str) -> String {
        blake3::hash(content.as_bytes()).to_hex().to_string()
    }

    /// Number of metadata fields. Richer assets win retention ties.
    pub fn metadata_richness(&self) -> usize {
        self.metadata.len()
    }

    /// Content length in Unicode scalar values, independent of encoding width.
    pub fn content_length(&self) -> usize {
        self.content.chars().count()
    }

    /// True when the content has no non-whitespace characters.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn is_quarantined(&self) -> bool {
        self.metadata
            .get(QUARANTINED_METADATA_KEY)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    /// Quality score stored by the corpus in metadata, if parseable.
    pub fn metadata_quality_score(&self) -> Option<f64> {
        self.metadata
            .get(QUALITY_SCORE_METADATA_KEY)
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    /// Age in fractional days since the last update.
    pub fn age_days(&self, now: DateTime<Utc>) -> f64 {
        let secs = (now - self.updated_at).num_seconds().max(0);
        secs as f64 / 86_400.0
    }
}

/// Identity equality: two assets are equal if they have the same id.
impl PartialEq for Asset {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn new_computes_hash_and_copies_timestamps() {
        let now = Utc::now();
        let a = Asset::new("a", "hello", SourceType::Chunk, now);
        assert_eq!(a.content_hash, Asset::compute_content_hash("hello"));
        assert_eq!(a.updated_at, now);
    }

    #[test]
    fn quarantine_flag_is_case_insensitive() {
        let a = Asset::new("a", "x", SourceType::Chunk, Utc::now()).with_metadata("quarantined", "TRUE");
        assert!(a.is_quarantined());
    }

    #[test]
    fn age_never_negative() {
        let now = Utc::now();
        let a = Asset::new("a", "x", SourceType::Chunk, now + Duration::days(2));
        assert_eq!(a.age_days(now), 0.0);
    }

    #[test]
    fn content_length_counts_chars() {
        let a = Asset::new("a", "héllo", SourceType::Chunk, Utc::now());
        assert_eq!(a.content_length(), 5);
    }
}
