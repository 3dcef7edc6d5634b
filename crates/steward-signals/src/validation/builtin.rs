//! Built-in rules.

use std::sync::LazyLock;

use regex::Regex;
use steward_core::models::{FindingSeverity, ValidationFinding};
use steward_core::traits::IAssetRule;
use steward_core::Asset;

/// Content is blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContent;

impl IAssetRule for EmptyContent {
    fn name(&self) -> &str {
        "empty_content"
    }

    fn evaluate(&self, asset: &Asset) -> Option<ValidationFinding> {
        asset.is_blank().then(|| {
            ValidationFinding::new(
                &asset.id,
                self.name(),
                FindingSeverity::Error,
                "content is empty or whitespace-only",
            )
        })
    }
}

/// Trimmed content shorter than `min` characters. Blank content is left to [`EmptyContent`].
#[derive(Debug, Clone, Copy)]
pub struct MinLength {
    min: usize,
}

impl MinLength {
    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

impl IAssetRule for MinLength {
    fn name(&self) -> &str {
        "min_length"
    }

    fn evaluate(&self, asset: &Asset) -> Option<ValidationFinding> {
        let len = asset.content.trim().chars().count();
        (len > 0 && len < self.min).then(|| {
            ValidationFinding::new(
                &asset.id,
                self.name(),
                FindingSeverity::Warning,
                format!("content too short: {len} chars (min: {})", self.min),
            )
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MaxLength {
    max: usize,
}

impl MaxLength {
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl IAssetRule for MaxLength {
    fn name(&self) -> &str {
        "max_length"
    }

    fn evaluate(&self, asset: &Asset) -> Option<ValidationFinding> {
        let len = asset.content_length();
        (len > self.max).then(|| {
            ValidationFinding::new(
                &asset.id,
                self.name(),
                FindingSeverity::Warning,
                format!("content too long: {len} chars (max: {})", self.max),
            )
        })
    }
}

/// C0 control characters other than tab, newline and carriage return.
static CONTROL_CHARS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").ok());

#[derive(Debug, Clone, Copy, Default)]
pub struct ControlCharacters;

impl IAssetRule for ControlCharacters {
    fn name(&self) -> &str {
        "control_characters"
    }

    fn evaluate(&self, asset: &Asset) -> Option<ValidationFinding> {
        let count = CONTROL_CHARS.as_ref()?.find_iter(&asset.content).count();
        (count > 0).then(|| {
            ValidationFinding::new(
                &asset.id,
                self.name(),
                FindingSeverity::Error,
                format!("found {count} control characters"),
            )
        })
    }
}

/// Replacement characters left by a lossy decode.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodingIntegrity;

impl IAssetRule for EncodingIntegrity {
    fn name(&self) -> &str {
        "encoding_integrity"
    }

    fn evaluate(&self, asset: &Asset) -> Option<ValidationFinding> {
        let count = asset.content.matches('\u{FFFD}').count();
        (count > 0).then(|| {
            ValidationFinding::new(
                &asset.id,
                self.name(),
                FindingSeverity::Warning,
                format!("found {count} replacement characters"),
            )
        })
    }
}

/// Metadata keys every asset must carry, non-empty.
#[derive(Debug, Clone)]
pub struct RequiredMetadata {
    keys: Vec<String>,
}

impl RequiredMetadata {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }
}

impl IAssetRule for RequiredMetadata {
    fn name(&self) -> &str {
        "required_metadata"
    }

    fn evaluate(&self, asset: &Asset) -> Option<ValidationFinding> {
        let missing: Vec<&str> = self
            .keys
            .iter()
            .filter(|k| asset.metadata.get(*k).map_or(true, |v| v.trim().is_empty()))
            .map(String::as_str)
            .collect();
        (!missing.is_empty()).then(|| {
            ValidationFinding::new(
                &asset.id,
                self.name(),
                FindingSeverity::Error,
                format!("missing metadata: {}", missing.join(", ")),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steward_core::SourceType;

    fn asset(content: &str) -> Asset {
        Asset::new("a", content, SourceType::Chunk, chrono::Utc::now())
    }

    #[test]
    fn empty_content_is_error() {
        let f = EmptyContent.evaluate(&asset(" \n ")).unwrap();
        assert_eq!(f.severity, FindingSeverity::Error);
        assert!(EmptyContent.evaluate(&asset("x")).is_none());
    }

    #[test]
    fn min_length_ignores_blank() {
        let rule = MinLength::new(10);
        assert!(rule.evaluate(&asset("   ")).is_none());
        assert!(rule.evaluate(&asset("short")).is_some());
        assert!(rule.evaluate(&asset("long enough text")).is_none());
    }

    #[test]
    fn max_length_counts_chars() {
        assert!(MaxLength::new(3).evaluate(&asset("ééé")).is_none());
        assert!(MaxLength::new(3).evaluate(&asset("éééé")).is_some());
    }

    #[test]
    fn control_characters_allow_whitespace() {
        let rule = ControlCharacters;
        assert!(rule.evaluate(&asset("line\nnext\ttab\r\n")).is_none());
        let f = rule.evaluate(&asset("bell\x07 and esc\x1b")).unwrap();
        assert!(f.message.contains('2'));
    }

    #[test]
    fn encoding_integrity_counts_replacements() {
        let f = EncodingIntegrity.evaluate(&asset("a\u{FFFD}b\u{FFFD}")).unwrap();
        assert!(f.message.contains("2 replacement"));
    }

    #[test]
    fn required_metadata_lists_missing_keys() {
        let rule = RequiredMetadata::new(vec!["source".into(), "author".into()]);
        let a = asset("x").with_metadata("source", "wiki").with_metadata("author", " ");
        let f = rule.evaluate(&a).unwrap();
        assert_eq!(f.message, "missing metadata: author");
    }
}
