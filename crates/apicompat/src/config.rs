use std::path::{Path, PathBuf};

use apicompat_error::FatalError;
use apicompat_snapshot::{DEFAULT_FILE_NAME, DEFAULT_OUTPUT_ROOT, OutputLayout};
use pkg_loader::LoaderConfig;
use serde::Deserialize;
use tracing::debug;

/// Looked up in the working directory when `APICOMPAT_CONFIG` is unset.
pub const CONFIG_FILE: &str = "apicompat.toml";
pub const CONFIG_ENV: &str = "APICOMPAT_CONFIG";

/** Raw TOML mapping; every key is optional. */
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    output_root: Option<PathBuf>,
    #[serde(default)]
    file_name: Option<String>,
    #[serde(default)]
    module_command: Option<Vec<String>>,
    #[serde(default)]
    loader_command: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApicompatConfig {
    pub output_root: PathBuf,
    pub file_name: String,
    pub loader: LoaderConfig,
}

impl Default for ApicompatConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            file_name: DEFAULT_FILE_NAME.to_string(),
            loader: LoaderConfig::default(),
        }
    }
}

impl ApicompatConfig {
    /// Parse a configuration from a TOML string.
    ///
    /// Example TOML:
    /// output_root = "internal/apicompat"
    /// file_name = "apicompat.go"
    /// module_command = ["go", "list", "-m"]
    /// loader_command = ["apicompat-frontend", "-tags", "integration"]
    pub fn from_toml_str(input: &str) -> Result<Self, String> {
        let raw: RawConfig = toml::from_str(input).map_err(|e| format!("TOML parse error: {e}"))?;
        let defaults = Self::default();

        let module_command = raw.module_command.unwrap_or(defaults.loader.module_command);
        let loader_command = raw.loader_command.unwrap_or(defaults.loader.loader_command);
        if module_command.is_empty() || loader_command.is_empty() {
            return Err("commands must name a program".to_string());
        }
        let file_name = raw.file_name.unwrap_or(defaults.file_name);
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(format!("file_name must be a bare file name, got {file_name:?}"));
        }

        Ok(Self {
            output_root: raw.output_root.unwrap_or(defaults.output_root),
            file_name,
            loader: LoaderConfig {
                module_command,
                loader_command,
            },
        })
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, FatalError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| FatalError::FileOperation {
            operation: "read config",
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|message| FatalError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// `$APICOMPAT_CONFIG` if set (the file must exist), else `./apicompat.toml` if
    /// present, else the defaults.
    pub fn discover() -> Result<Self, FatalError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            debug!("loading config from ${CONFIG_ENV}: {}", Path::new(&path).display());
            return Self::load_from_path(path);
        }
        let local = Path::new(CONFIG_FILE);
        if local.is_file() {
            debug!("loading config from {CONFIG_FILE}");
            return Self::load_from_path(local);
        }
        Ok(Self::default())
    }

    pub fn layout(&self, module: impl Into<String>) -> OutputLayout {
        OutputLayout::new(module)
            .with_root(&self.output_root)
            .with_file_name(&self.file_name)
    }
}
