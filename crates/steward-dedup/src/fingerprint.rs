//! Content fingerprints via xxh3-128.

use std::borrow::Cow;

use steward_core::config::DedupConfig;
use steward_core::errors::DedupError;
use steward_core::Asset;
use xxhash_rust::xxh3::xxh3_128;

/// 128-bit content fingerprint.
pub type Fingerprint = u128;

/// Normalizes content to a canonical form and hashes it.
///
/// Normalization is byte-level and locale-free: optional whitespace
/// collapsing, never case folding. Content that carries a replacement
/// character or a NUL byte has already lost information upstream and
/// cannot be canonicalized.
#[derive(Debug, Clone, Copy)]
pub struct ContentFingerprinter {
    normalize_whitespace: bool,
}

impl Default for ContentFingerprinter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ContentFingerprinter {
    pub fn new(normalize_whitespace: bool) -> Self {
        Self {
            normalize_whitespace,
        }
    }

    pub fn from_config(config: &DedupConfig) -> Self {
        Self::new(config.normalize_whitespace)
    }

    /// Canonical form of `content`. Borrowed when already canonical.
    pub fn normalize<'a>(&self, content: &'a str) -> Cow<'a, str> {
        if !self.normalize_whitespace {
            return Cow::Borrowed(content);
        }
        let trimmed = content.trim();
        let needs_collapse = trimmed
            .char_indices()
            .any(|(i, c)| c.is_whitespace() && (c != ' ' || trimmed[i + 1..].starts_with(char::is_whitespace)));
        if !needs_collapse {
            return Cow::Borrowed(trimmed);
        }
        let mut out = String::with_capacity(trimmed.len());
        for (i, word) in trimmed.split_whitespace().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(word);
        }
        Cow::Owned(out)
    }

    /// Fingerprint raw content on behalf of `asset_id`.
    pub fn fingerprint_content(&self, asset_id: &str, content: &str) -> Result<Fingerprint, DedupError> {
        if content.contains('\u{FFFD}') {
            return Err(DedupError::Encoding {
                asset_id: asset_id.to_string(),
                reason: "contains U+FFFD replacement character".to_string(),
            });
        }
        if content.contains('\0') {
            return Err(DedupError::Encoding {
                asset_id: asset_id.to_string(),
                reason: "contains NUL byte".to_string(),
            });
        }
        Ok(xxh3_128(self.normalize(content).as_bytes()))
    }

    pub fn fingerprint(&self, asset: &Asset) -> Result<Fingerprint, DedupError> {
        self.fingerprint_content(&asset.id, &asset.content)
    }
}
