use std::path::PathBuf;
use std::process::ExitStatus;

use apicompat_error::FatalError;

pub const STEP_MODULE_PATH: &str = "module path lookup";
pub const STEP_LOAD: &str = "package load";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no command configured")]
    EmptyCommand { step: &'static str },

    #[error("failed to run `{program}`: {source}")]
    Spawn {
        step: &'static str,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    CommandFailed {
        step: &'static str,
        command: String,
        status: ExitStatus,
    },

    #[error("`{command}` wrote non UTF-8 output")]
    NotUtf8 { step: &'static str, command: String },

    #[error("no module path reported; is the working directory inside a module?")]
    NoModule,

    #[error("expected one module, found {}: {}", .0.len(), .0.join(", "))]
    MultipleModules(Vec<String>),

    #[error("malformed package stream: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("package {path} failed to load: {}", errors.join("; "))]
    PackageErrors { path: String, errors: Vec<String> },
}

impl LoadError {
    /// Which external step failed.
    pub fn step(&self) -> &'static str {
        match self {
            LoadError::EmptyCommand { step }
            | LoadError::Spawn { step, .. }
            | LoadError::CommandFailed { step, .. }
            | LoadError::NotUtf8 { step, .. } => *step,
            LoadError::NoModule | LoadError::MultipleModules(_) => STEP_MODULE_PATH,
            LoadError::Decode(_) | LoadError::Read { .. } | LoadError::PackageErrors { .. } => {
                STEP_LOAD
            }
        }
    }
}

impl From<LoadError> for FatalError {
    fn from(err: LoadError) -> Self {
        FatalError::ExternalResolution {
            step: err.step(),
            message: err.to_string(),
        }
    }
}

impl From<LoadError> for apicompat_error::Error {
    fn from(err: LoadError) -> Self {
        FatalError::from(err).into()
    }
}
