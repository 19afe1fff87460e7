use std::path::Path;

use apicompat_core::Package;
use tracing::{debug, info};

use crate::LOG_TARGET_LOAD;
use crate::command::run_captured;
use crate::error::{LoadError, STEP_LOAD};

/// Runs the front end with `patterns` appended and parses what it prints.
pub fn load_packages(command: &[String], patterns: &[String]) -> Result<Vec<Package>, LoadError> {
    let stdout = run_captured(STEP_LOAD, command, patterns)?;
    let packages = parse_packages(&stdout)?;
    info!(target: LOG_TARGET_LOAD, "loaded {} packages", packages.len());
    Ok(packages)
}

/// Loads a package stream saved to disk.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Vec<Package>, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_packages(&text)
}

/// Parses concatenated `Package` objects or a single array of them. A package the
/// front end could not load or type-check is an error.
pub fn parse_packages(json: &str) -> Result<Vec<Package>, LoadError> {
    let packages: Vec<Package> = if json.trim_start().starts_with('[') {
        serde_json::from_str(json)?
    } else {
        serde_json::Deserializer::from_str(json)
            .into_iter::<Package>()
            .collect::<Result<_, _>>()?
    };

    if let Some(broken) = packages.iter().find(|pkg| !pkg.errors.is_empty()) {
        return Err(LoadError::PackageErrors {
            path: broken.path.clone(),
            errors: broken.errors.clone(),
        });
    }
    for pkg in &packages {
        debug!(target: LOG_TARGET_LOAD, "package {} ({} files)", pkg.path, pkg.files.len());
    }
    Ok(packages)
}
