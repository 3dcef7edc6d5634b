//! Test fixtures for Steward: JSON corpus loader, an in-memory corpus,
//! static signal providers and a recording alert sink.

mod alerts;
mod corpus;
mod providers;

pub use alerts::RecordingAlertSink;
pub use corpus::InMemoryCorpus;
pub use providers::{FailingProvider, StaticFreshness, StaticQuality, StaticValidation};

use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use steward_core::{Asset, SourceType};

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a corpus fixture (`corpus/<name>.json`) as assets.
pub fn load_corpus(name: &str) -> Vec<Asset> {
    load_fixture(&format!("corpus/{name}.json"))
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Fixed reference instant used across fixtures: 2026-01-15T00:00:00Z.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).single().unwrap_or_else(Utc::now)
}

/// A document asset created at [`t0`].
pub fn asset(id: &str, content: &str) -> Asset {
    Asset::new(id, content, SourceType::Document, t0())
}

/// The three-asset scenario: `a` and `b` byte-identical, `c` a near-duplicate
/// of `b` at cosine 0.97. `b` carries the richest metadata.
pub fn hello_world_trio() -> Vec<Asset> {
    vec![
        asset("a", "hello world").with_embedding(vec![1.0, 0.0]),
        asset("b", "hello world")
            .with_embedding(vec![1.0, 0.0])
            .with_metadata("source", "wiki")
            .with_metadata("author", "ops"),
        asset("c", "Hello World!").with_embedding(vec![0.97, 0.243_1]),
    ]
}
