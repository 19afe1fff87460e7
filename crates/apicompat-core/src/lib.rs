//! Core data types shared across the apicompat workspace.
//!
//! - [`types`]: resolved static types as reported by the analysis front end.
//! - [`syntax`]: the per-package declaration tree the front end hands over.
//! - [`canonical`]: the re-emittable form a snapshot entry is built from.

pub mod canonical;
pub mod syntax;
pub mod types;

pub use canonical::{CanonicalType, FuncSignature, Param, Results};
pub use syntax::{Decl, Expr, Field, FieldList, FuncDecl, GenDecl, GenToken, Package, SourceFile};
pub use types::{ChanDir, TypeNode};

/// Name of the universe-scope error interface.
pub const UNIVERSE_ERROR: &str = "error";

/// Package name of an executable entry point.
pub const MAIN_PACKAGE: &str = "main";

/// Reports whether `name` is visible outside its defining package, i.e. whether it
/// starts with an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
