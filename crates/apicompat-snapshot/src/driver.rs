//! Per-package orchestration: select, extract, assemble, write.

use std::io::Write;
use std::path::PathBuf;

use apicompat_core::Package;
use tracing::{debug, error, info};

use crate::assemble::{OutputLayout, PackageSnapshot, assemble};
use crate::error::{ExtractError, SnapshotError};
use crate::extract::extract;
use crate::logging::{LOG_TARGET_DRIVER, LogStyle};
use crate::select::select;

/// Extracts every eligible top-level function of `pkg`. The first declaration that
/// cannot be snapshotted aborts the package.
pub fn snapshot_package(pkg: &Package, layout: &OutputLayout) -> Result<PackageSnapshot, ExtractError> {
    let mut entries = Vec::new();
    for decl in pkg.func_decls() {
        if let Some(entry) = extract(&pkg.path, decl)? {
            entries.push(entry);
        }
    }
    Ok(assemble(&pkg.path, &pkg.name, entries, layout))
}

/// Snapshots every eligible package of `layout.module`, printing each package path to
/// stdout as it starts. Returns the written files in processing order.
pub fn run(packages: &[Package], layout: &OutputLayout) -> Result<Vec<PathBuf>, SnapshotError> {
    let stdout = std::io::stdout();
    let mut progress = stdout.lock();
    run_with_progress(packages, layout, &mut progress)
}

pub fn run_with_progress<W: Write>(
    packages: &[Package],
    layout: &OutputLayout,
    progress: &mut W,
) -> Result<Vec<PathBuf>, SnapshotError> {
    let selected = select(packages, &layout.module);
    info!(
        target: LOG_TARGET_DRIVER,
        "{} of {} packages selected in module {}",
        selected.len(),
        packages.len(),
        layout.module.log_path()
    );

    let mut written = Vec::with_capacity(selected.len());
    for pkg in selected {
        writeln!(progress, "{}", pkg.path).map_err(|source| SnapshotError::Io {
            operation: "report progress",
            path: PathBuf::from("<stdout>"),
            source,
        })?;

        let snapshot = snapshot_package(pkg, layout).inspect_err(|err| {
            error!(target: LOG_TARGET_DRIVER, "{}", err.to_string().log_error());
        })?;
        let path = snapshot.write()?;
        debug!(
            target: LOG_TARGET_DRIVER,
            "wrote {} ({} entries)",
            path.display(),
            snapshot.entries.len()
        );
        written.push(path.to_path_buf());
    }
    Ok(written)
}
