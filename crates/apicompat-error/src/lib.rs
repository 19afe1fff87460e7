pub mod domain;
pub mod fatal;
pub mod internal;
pub mod policy;
pub mod severity;

// public exports
pub use domain::DomainError;
pub use fatal::FatalError;
pub use internal::InternalError;
pub use policy::{ErrorPolicy, StderrPolicy, render_chain};
pub use severity::Severity;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Run-level error. Every variant aborts the run; the split only decides how the
/// failure is reported.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fatal(#[from] FatalError),
    #[error(transparent)]
    Internal(#[from] InternalError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl Error {
    pub fn severity(&self) -> Severity {
        match self {
            Error::Domain(_) => Severity::Error,
            Error::Fatal(_) | Error::Internal(_) => Severity::Fatal,
        }
    }

    /// True when the failure points at a defect in apicompat itself rather than at
    /// the analysed code or the environment.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn severity_by_origin() {
        let unsupported: Error = DomainError::UnsupportedType {
            item: "example.com/m/p.Open".into(),
            message: "cannot use unexported type: example.com/m/p.handle".into(),
        }
        .into();
        assert_eq!(unsupported.severity(), Severity::Error);
        assert!(!unsupported.is_internal());

        let shape: Error = InternalError::UnimplementedTypeShape {
            shape: "chan",
            ty: "chan int".into(),
        }
        .into();
        assert_eq!(shape.severity(), Severity::Fatal);
        assert!(shape.is_internal());

        let io: Error = FatalError::FileOperation {
            operation: "write",
            path: PathBuf::from("internal/apicompat/apicompat.go"),
            source: std::io::Error::other("disk full"),
        }
        .into();
        assert_eq!(io.severity(), Severity::Fatal);
    }

    #[test]
    fn display_is_transparent() {
        let err: Error = DomainError::UnsupportedType {
            item: "example.com/m/p.Open".into(),
            message: "anonymous interfaces are unsupported".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "unsupported type in example.com/m/p.Open: anonymous interfaces are unsupported"
        );
    }
}
