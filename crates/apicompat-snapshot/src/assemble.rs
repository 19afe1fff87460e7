use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SnapshotError;
use crate::extract::SnapshotEntry;
use crate::logging::{LOG_TARGET_ASSEMBLE, LogStyle};
use crate::render::render_file;

/// Default directory, relative to the working directory, that receives the snapshots.
pub const DEFAULT_OUTPUT_ROOT: &str = "internal/apicompat";
/// Default file name of each generated unit.
pub const DEFAULT_FILE_NAME: &str = "apicompat.go";

/// Where generated units go: `<root>/<package path minus module>/<file_name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub root: PathBuf,
    pub file_name: String,
    pub module: String,
}

impl OutputLayout {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            file_name: DEFAULT_FILE_NAME.to_string(),
            module: module.into(),
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Output file for the package at import path `pkg_path`.
    pub fn output_path(&self, pkg_path: &str) -> PathBuf {
        let suffix = pkg_path
            .strip_prefix(self.module.as_str())
            .unwrap_or(pkg_path)
            .trim_start_matches('/');
        let mut path = self.root.clone();
        if !suffix.is_empty() {
            path.push(suffix);
        }
        path.push(&self.file_name);
        path
    }
}

// ANCHOR: PackageSnapshot
/// The exported functions of one package, sorted by name.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PackageSnapshot {
    pub package_path: String,
    pub package_name: String,
    pub output_path: PathBuf,
    pub entries: Vec<SnapshotEntry>,
}
//ANCHOR_END: PackageSnapshot

/// Deduplicates `entries` by name (the last one wins) and orders them by name.
pub fn assemble(
    pkg_path: &str,
    pkg_name: &str,
    entries: impl IntoIterator<Item = SnapshotEntry>,
    layout: &OutputLayout,
) -> PackageSnapshot {
    let mut by_name: BTreeMap<String, SnapshotEntry> = BTreeMap::new();
    for entry in entries {
        if let Some(previous) = by_name.insert(entry.name.clone(), entry) {
            warn!(
                target: LOG_TARGET_ASSEMBLE,
                "duplicate declaration {}.{}; keeping the last one",
                pkg_path.log_path(),
                previous.name.log_name()
            );
        }
    }
    debug!(
        target: LOG_TARGET_ASSEMBLE,
        "assembled {} with {} entries",
        pkg_path.log_path(),
        by_name.len()
    );
    PackageSnapshot {
        package_path: pkg_path.to_string(),
        package_name: pkg_name.to_string(),
        output_path: layout.output_path(pkg_path),
        entries: by_name.into_values().collect(),
    }
}

impl PackageSnapshot {
    pub fn render(&self) -> String {
        render_file(self)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Renders and writes the unit to `output_path`, creating parent directories.
    pub fn write(&self) -> Result<&Path, SnapshotError> {
        let path = self.output_path.as_path();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| SnapshotError::Io {
                operation: "create_dir_all",
                path: dir.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, self.render()).map_err(|source| SnapshotError::Io {
            operation: "write",
            path: path.to_path_buf(),
            source,
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apicompat_core::{CanonicalType, FuncSignature, Param, Results};
    use pretty_assertions::assert_eq;

    const MODULE: &str = "example.com/m";

    fn entry(name: &str, params: Vec<Param>) -> SnapshotEntry {
        SnapshotEntry {
            name: name.to_string(),
            signature: FuncSignature {
                params,
                results: Results::None,
            },
            origin: format!("{MODULE}/p"),
        }
    }

    #[test]
    fn output_path_strips_module_prefix() {
        let layout = OutputLayout::new(MODULE);
        assert_eq!(
            layout.output_path("example.com/m/store/kv"),
            PathBuf::from("internal/apicompat/store/kv/apicompat.go")
        );
        assert_eq!(
            layout.output_path(MODULE),
            PathBuf::from("internal/apicompat/apicompat.go")
        );

        let custom = OutputLayout::new(MODULE).with_root("out").with_file_name("api.go");
        assert_eq!(custom.output_path("example.com/m/p"), PathBuf::from("out/p/api.go"));
    }

    #[test]
    fn entries_are_sorted_bytewise() {
        let snapshot = assemble(
            "example.com/m/p",
            "p",
            ["Zeta", "Alpha", "alphaLower", "Beta", "ALPHA"].map(|n| entry(n, vec![])),
            &OutputLayout::new(MODULE),
        );
        assert_eq!(
            snapshot.names().collect::<Vec<_>>(),
            vec!["ALPHA", "Alpha", "Beta", "Zeta", "alphaLower"]
        );
    }

    #[test]
    fn last_duplicate_wins() {
        let first = entry("Open", vec![]);
        let second = entry("Open", vec![Param::new(CanonicalType::ident("string"))]);
        let snapshot = assemble(
            "example.com/m/p",
            "p",
            [first, second.clone()],
            &OutputLayout::new(MODULE),
        );
        assert_eq!(snapshot.entries, vec![second]);
    }

    #[test]
    fn write_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(MODULE).with_root(dir.path().join("internal/apicompat"));
        let snapshot = assemble("example.com/m/a/b", "b", [], &layout);
        let written = snapshot.write().unwrap();
        assert_eq!(written, dir.path().join("internal/apicompat/a/b/apicompat.go"));
        let contents = std::fs::read_to_string(written).unwrap();
        assert_eq!(contents, "// Code generated by apicompat. DO NOT EDIT.\n\npackage b\n");
    }
}
