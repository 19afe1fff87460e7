//! Front-end adapter: resolves the enclosing module and loads its typed packages.
//!
//! Both steps shell out to external commands and complete before any analysis starts.
//! The package front end writes `Package` objects as JSON on stdout, either
//! concatenated or wrapped in one array.

mod command;
pub mod error;
pub mod load;
pub mod module_path;

pub use error::LoadError;
pub use load::{load_from_path, load_packages, parse_packages};
pub use module_path::{parse_module_path, resolve_module_path};

pub(crate) const LOG_TARGET_LOAD: &str = "apicompat::load";

/// Patterns used when none are given.
pub const DEFAULT_PATTERNS: [&str; 1] = ["./..."];

/// External commands the loader runs. Each is a program followed by its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Prints the module path on stdout.
    pub module_command: Vec<String>,
    /// Receives the package patterns as trailing arguments.
    pub loader_command: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            module_command: vec!["go".into(), "list".into(), "-m".into()],
            loader_command: vec!["apicompat-frontend".into()],
        }
    }
}

impl LoaderConfig {
    pub fn module_path(&self) -> Result<String, LoadError> {
        resolve_module_path(&self.module_command)
    }

    pub fn load(&self, patterns: &[String]) -> Result<Vec<apicompat_core::Package>, LoadError> {
        load_packages(&self.loader_command, patterns)
    }
}
