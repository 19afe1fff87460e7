use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    /// Module root lookup or package loading failed.
    #[error("{step} failed: {message}")]
    ExternalResolution { step: &'static str, message: String },

    #[error("I/O failure on {path:?}: {operation}: {source}")]
    FileOperation {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path:?}: {message}")]
    Config { path: PathBuf, message: String },
}
