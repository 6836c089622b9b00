//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! A SysML project is configured by a single `sysml.toml` at its root. The
//! file is found by walking up from the working directory, so commands run
//! from `models/sub/` still see the project's settings.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. The nearest `sysml.toml`
//! 3. CLI flags (not handled here)
//!
//! # Example
//!
//! ```no_run
//! use sysml_v2::core::config::load_config;
//! use std::path::Path;
//!
//! let result = load_config(Some(Path::new("/path/to/project"))).unwrap();
//! let config = result.config;
//!
//! println!("Backend: {}", config.backend());
//! println!("API: {}", config.server_url());
//! ```

pub mod schema;

pub use schema::{
    FlexoSection, LibrarySection, ProjectConfig, ProjectSection, ServerSection, ValidateSection,
};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::paths;

/// Name of the project config file.
pub const CONFIG_FILENAME: &str = "sysml.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Result of loading configuration.
#[derive(Debug, Clone)]
pub struct ConfigLoadResult {
    /// The loaded configuration (defaults when no file was found).
    pub config: ProjectConfig,
    /// Path of the file the configuration was read from.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    /// Directory containing the loaded config file, if any.
    pub fn project_root(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }
}

/// Walk up from `start` (or the process working directory) looking for
/// `sysml.toml`. Returns the path of the nearest one.
pub fn find_config(start: Option<&Path>) -> Option<PathBuf> {
    let start = match start {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().ok()?,
    };
    paths::find_upward(&start, &[CONFIG_FILENAME])
}

/// Load project config from the nearest `sysml.toml`, or return defaults.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read, parsed,
/// or validated. A missing config file is not an error.
pub fn load_config(start: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
    let Some(path) = find_config(start) else {
        tracing::debug!("no {} found, using defaults", CONFIG_FILENAME);
        return Ok(ConfigLoadResult {
            config: ProjectConfig::default(),
            path: None,
        });
    };

    tracing::debug!(path = %path.display(), "loading config");
    let config = read_config(&path)?;
    Ok(ConfigLoadResult {
        config,
        path: Some(path),
    })
}

/// Read, parse and validate a specific config file.
pub fn read_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: ProjectConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    config.validate().map_err(|e| match e {
        ConfigError::InvalidValue(message) => ConfigError::ParseError {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })?;

    Ok(config)
}
