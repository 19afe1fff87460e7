//! Test scaffolding: package builders, on-disk JSON fixtures and tracing setup.

pub mod fixtures;

use std::path::{Path, PathBuf};

use apicompat_core::Package;

/// Gets the absolute path to the workspace root directory
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent() // crates/
        .and_then(Path::parent)
        .expect("Failed to get workspace root")
        .to_path_buf()
}

/// Gets the absolute path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    workspace_root().join("tests/fixtures")
}

/// Reads `tests/fixtures/<name>.json`, a front-end package stream stored as an array.
pub fn load_fixture(name: &str) -> Vec<Package> {
    let path = fixtures_dir().join(format!("{name}.json"));
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
    serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
}

/// Install a tracing subscriber for tests if none is set yet. Honors `RUST_LOG`.
/// Returns true if a subscriber was installed by this call.
pub fn init_tracing_once() -> bool {
    use tracing_subscriber::{EnvFilter, fmt};
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .is_ok()
}
