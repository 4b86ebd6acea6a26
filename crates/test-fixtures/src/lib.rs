//! Test fixtures for tokenscope: an in-memory host document, node/style
//! builders, and a loader for the JSON documents under `test-fixtures/`.

pub mod builders;
pub mod document;

use std::path::PathBuf;

use serde::de::DeserializeOwned;

pub use builders::*;
pub use document::{DocumentFixture, MemoryDocument};

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("documents").exists() {
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

/// Load a document fixture from `test-fixtures/documents/<name>.json`.
pub fn load_document(name: &str) -> MemoryDocument {
    let fixture: DocumentFixture = load_fixture(&format!("documents/{name}.json"));
    MemoryDocument::from_fixture(fixture)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}
