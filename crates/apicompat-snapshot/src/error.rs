use std::fmt;
use std::path::PathBuf;

use apicompat_core::TypeNode;
use apicompat_error::{DomainError, FatalError, InternalError};
use thiserror::Error;

/// Failure to turn a [`TypeNode`] into a canonical type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// A non-exported named type cannot be referenced from outside its package.
    #[error("cannot use unexported type: {0}")]
    UnexportedType(String),

    #[error("anonymous interfaces are unsupported")]
    AnonymousInterface,

    /// The type is outside the set the converter knows how to render.
    #[error("unimplemented type shape `{shape}`: {ty}")]
    UnimplementedShape { shape: &'static str, ty: String },

    /// A signature marked variadic whose last parameter is not a slice.
    #[error("malformed variadic signature: {0}")]
    MalformedVariadic(String),
}

impl ConvertError {
    /// True for failures caused by the analysed code, false for converter defects.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            ConvertError::UnexportedType(_) | ConvertError::AnonymousInterface
        )
    }
}

/// Position of a type inside a function signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Param(usize),
    Result(usize),
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Param(i) => write!(f, "parameter {i}"),
            Slot::Result(i) => write!(f, "result {i}"),
        }
    }
}

/// A declaration could not be snapshotted. Carries the package, function and the
/// offending declared type so the caller can report it.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{package}.{function}: {slot} of type {ty}: {source}")]
pub struct ExtractError {
    pub package: String,
    pub function: String,
    pub slot: Slot,
    pub ty: TypeNode,
    #[source]
    pub source: ConvertError,
}

impl ExtractError {
    /// `package.Function`
    pub fn item(&self) -> String {
        format!("{}.{}", self.package, self.function)
    }
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("I/O failure on {path:?}: {operation}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ExtractError> for apicompat_error::Error {
    fn from(err: ExtractError) -> Self {
        let item = err.item();
        let context = format!("{} of type {}", err.slot, err.ty);
        match err.source {
            ConvertError::UnexportedType(_) | ConvertError::AnonymousInterface => {
                DomainError::UnsupportedType {
                    item,
                    message: format!("{context}: {}", err.source),
                }
                .into()
            }
            ConvertError::UnimplementedShape { shape, ty } => {
                InternalError::UnimplementedTypeShape {
                    shape,
                    ty: format!("{ty} ({item}, {context})"),
                }
                .into()
            }
            ConvertError::MalformedVariadic(sig) => {
                InternalError::InvalidState(format!("{item}: malformed variadic signature {sig}"))
                    .into()
            }
        }
    }
}

impl From<SnapshotError> for apicompat_error::Error {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::Extract(inner) => inner.into(),
            SnapshotError::Io {
                operation,
                path,
                source,
            } => FatalError::FileOperation {
                operation,
                path,
                source,
            }
            .into(),
        }
    }
}
