//! core::types
//!
//! Small closed enums shared by the config layer and the CLI.
//!
//! # Types
//!
//! - [`Backend`] - Which API server implementation the local stack runs
//! - [`ValidateMode`] - Where `sysml validate` parses model files
//!
//! Both deserialize from the lowercase strings used in `sysml.toml` and
//! double as clap value enums for `--backend`.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API server backend for the local Docker Compose stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Flexo MMS with the SysML v2 API layer (prebuilt images).
    #[default]
    Flexo,
    /// Gearshift (built from source on first start).
    Gearshift,
}

impl Backend {
    /// Lowercase name as used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Flexo => "flexo",
            Backend::Gearshift => "gearshift",
        }
    }

    /// Whether `docker compose up` must build images locally.
    pub fn builds_images(&self) -> bool {
        matches!(self, Backend::Gearshift)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation mode for `sysml validate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidateMode {
    /// Parse files with the built-in parsing facade.
    #[default]
    Local,
    /// Send files to the server's `/parse` endpoint.
    Server,
}

impl fmt::Display for ValidateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidateMode::Local => f.write_str("local"),
            ValidateMode::Server => f.write_str("server"),
        }
    }
}
