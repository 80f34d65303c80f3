use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{map_io_err, PatchError, PatchResult};

/// Page patched when nothing else is configured, relative to the working directory
pub const DEFAULT_TARGET: &str = "public/index.html";

/// Settings for a single patch run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatcherConfig {
    /// File to read
    pub input: PathBuf,

    /// File to write; the input is overwritten when unset
    pub output: Option<PathBuf>,

    /// Write through a temporary file and rename it over the target
    pub atomic_write: bool,

    /// Compute the result and print a diff without writing
    pub dry_run: bool,
}

impl Default for PatcherConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_TARGET),
            output: None,
            atomic_write: false,
            dry_run: false,
        }
    }
}

impl PatcherConfig {
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.input)
    }

    pub fn validate(&self) -> PatchResult<()> {
        if self.input.as_os_str().is_empty() {
            return Err(PatchError::config("input path must not be empty"));
        }
        if matches!(&self.output, Some(out) if out.as_os_str().is_empty()) {
            return Err(PatchError::config("output path must not be empty"));
        }
        Ok(())
    }
}

/// The configuration loader
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader that yields the built-in defaults
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set a TOML config file to read
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Load the configuration. A config file that was asked for must exist.
    pub fn load(&self) -> PatchResult<PatcherConfig> {
        let Some(path) = &self.config_path else {
            return Ok(PatcherConfig::default());
        };

        debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(path).map_err(map_io_err(path))?;
        let config: PatcherConfig = toml::from_str(&content)
            .map_err(|e| PatchError::config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;

        Ok(config)
    }
}
