//! Picks the surviving member of a duplicate cluster.

use std::cmp::{Ordering, Reverse};

use chrono::{DateTime, Utc};
use steward_core::Asset;

/// Pure, deterministic retention. Ranking, best first:
/// most metadata fields, longest content, earliest `created_at`, smallest id.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetentionResolver;

type RetentionKey<'a> = (Reverse<usize>, Reverse<usize>, DateTime<Utc>, &'a str);

impl RetentionResolver {
    pub fn key(asset: &Asset) -> RetentionKey<'_> {
        (
            Reverse(asset.metadata_richness()),
            Reverse(asset.content_length()),
            asset.created_at,
            asset.id.as_str(),
        )
    }

    /// Compare two assets; `Less` means `a` is the better survivor.
    pub fn compare(a: &Asset, b: &Asset) -> Ordering {
        Self::key(a).cmp(&Self::key(b))
    }

    /// The representative of `members`, or `None` when empty.
    pub fn select<'a>(&self, members: &[&'a Asset]) -> Option<&'a Asset> {
        members.iter().copied().min_by(|a, b| Self::compare(a, b))
    }
}
