use apicompat_core::{CanonicalType, Expr, Field, FuncDecl, FuncSignature, Param, Results, is_exported};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::convert::convert;
use crate::error::{ConvertError, ExtractError, Slot};
use crate::logging::{LOG_TARGET_EXTRACT, LogStyle};

// ANCHOR: SnapshotEntry
/// One exported function, reconstructed.
///
/// Renders as `var <name> <signature> = <origin>.<name>`: a variable of the rebuilt
/// function type initialised with the real function, so compiling the snapshot against
/// another version of `origin` fails when the function is removed or its type changes.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    pub name: String,
    pub signature: FuncSignature,
    /// Import path of the package declaring the function.
    pub origin: String,
}
//ANCHOR_END: SnapshotEntry

/// Builds the snapshot entry for one top-level function of package `pkg_path`.
///
/// Methods and non-exported functions are skipped with `Ok(None)`. The first type that
/// cannot be converted aborts the declaration.
pub fn extract(pkg_path: &str, decl: &FuncDecl) -> Result<Option<SnapshotEntry>, ExtractError> {
    if decl.is_method() || !is_exported(&decl.name) {
        trace!(target: LOG_TARGET_EXTRACT, "skipping {}", decl.name.log_name());
        return Ok(None);
    }

    let fail = |slot: Slot, field: &Field, source| ExtractError {
        package: pkg_path.to_string(),
        function: decl.name.clone(),
        slot,
        ty: field.ty.resolved(),
        source,
    };

    let last = decl.params.list.len().checked_sub(1);
    let mut params = Vec::with_capacity(decl.params.num_fields());
    for (i, field) in decl.params.list.iter().enumerate() {
        let param = match &field.ty {
            // only a single trailing parameter may be variadic
            Expr::Ellipsis(elt) if Some(i) == last && field.names.len() <= 1 => {
                convert(elt).map(Param::variadic)
            }
            Expr::Ellipsis(elt) => Err(ConvertError::MalformedVariadic(
                format!("{} ...{elt}", field.names.join(", ")).trim_start().to_string(),
            )),
            Expr::Type(ty) => convert(ty).map(Param::new),
        }
        .map_err(|err| fail(Slot::Param(params.len()), field, err))?;
        // `a, b int` is two parameters of the same type
        params.extend(std::iter::repeat_n(param, field.arity()));
    }

    let results = match decl.results.num_fields() {
        0 => Results::None,
        // a single slot means a single field with at most one name
        1 => {
            let field = &decl.results.list[0];
            let ty = result_type(field).map_err(|err| fail(Slot::Result(0), field, err))?;
            Results::Single(Box::new(ty))
        }
        n => {
            let mut types = Vec::with_capacity(n);
            for field in &decl.results.list {
                let ty = result_type(field).map_err(|err| fail(Slot::Result(types.len()), field, err))?;
                types.extend(std::iter::repeat_n(ty, field.arity()));
            }
            Results::Tuple(types)
        }
    };

    let signature = FuncSignature { params, results };
    debug!(
        target: LOG_TARGET_EXTRACT,
        "extracted {}.{} ({} params, {} results)",
        pkg_path.log_path(),
        decl.name.log_name(),
        signature.params.len(),
        signature.results.len()
    );
    Ok(Some(SnapshotEntry {
        name: decl.name.clone(),
        signature,
        origin: pkg_path.to_string(),
    }))
}

fn result_type(field: &Field) -> Result<CanonicalType, ConvertError> {
    match &field.ty {
        Expr::Type(ty) => convert(ty),
        // results cannot be variadic; convert what the parameter would resolve to
        Expr::Ellipsis(_) => convert(&field.ty.resolved()),
    }
}
