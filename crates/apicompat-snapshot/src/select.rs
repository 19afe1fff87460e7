use apicompat_core::{MAIN_PACKAGE, Package};
use tracing::trace;

use crate::logging::{LOG_TARGET_DRIVER, LogStyle};

/// Path segments that hide a package from importers outside the module.
const HIDDEN_SEGMENTS: &[&str] = &["internal", "vendor"];

/// Packages of `module` whose API is snapshotted, in ascending import-path order.
pub fn select<'a>(packages: &'a [Package], module: &str) -> Vec<&'a Package> {
    let mut selected: Vec<&Package> = packages
        .iter()
        .filter(|pkg| {
            let eligible = is_eligible(pkg, module);
            if !eligible {
                trace!(target: LOG_TARGET_DRIVER, "not eligible: {}", pkg.path.log_path());
            }
            eligible
        })
        .collect();
    selected.sort_by(|a, b| a.path.cmp(&b.path));
    selected
}

pub fn is_eligible(pkg: &Package, module: &str) -> bool {
    within_module(&pkg.path, module) && pkg.name != MAIN_PACKAGE && !is_internal_package(&pkg.path)
}

/// `path` is the module itself or one of its subpackages.
pub fn within_module(path: &str, module: &str) -> bool {
    match path.strip_prefix(module) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

pub fn is_internal_package(path: &str) -> bool {
    path.split('/').any(|seg| HIDDEN_SEGMENTS.contains(&seg))
}
