//! core::config::schema
//!
//! Configuration schema types for `sysml.toml`.
//!
//! Every field is optional in the file. Defaults are applied by the accessor
//! methods on [`ProjectConfig`], so a config written by hand only needs the
//! keys it wants to change.
//!
//! # Validation
//!
//! Enum-valued keys are checked by serde during parsing. URLs are checked
//! after parsing by [`ProjectConfig::validate`].

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::{Backend, ValidateMode};

/// Default modeling API URL.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8083";

/// Default location of the SysML v2 standard library checkout.
pub const DEFAULT_LIBRARY_PATH: &str = "lib/SysML-v2-Release";

/// Default Flexo MMS layer-1 URL.
pub const DEFAULT_FLEXO_URL: &str = "http://localhost:8080";

/// Default bearer credential for the local Flexo stack.
pub const DEFAULT_FLEXO_TOKEN: &str = "sysml-local-dev";

/// Project configuration as stored in `sysml.toml`.
///
/// # Example
///
/// ```toml
/// [project]
/// name = "satellite"
///
/// [server]
/// backend = "gearshift"
/// url = "http://localhost:8083"
///
/// [library]
/// path = "lib/SysML-v2-Release"
///
/// [validate]
/// mode = "server"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project metadata written by `sysml init`
    pub project: ProjectSection,

    /// API server settings
    pub server: ServerSection,

    /// Standard library settings
    pub library: LibrarySection,

    /// Validation settings
    pub validate: ValidateSection,
}

/// `[project]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectSection {
    /// Human-readable project name
    pub name: Option<String>,
}

/// `[server]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSection {
    /// Backend run by `sysml serve`
    pub backend: Option<Backend>,

    /// Base URL of the modeling API
    pub url: Option<String>,

    /// Flexo bootstrap settings
    pub flexo: FlexoSection,
}

/// `[server.flexo]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlexoSection {
    /// Layer-1 service URL
    pub url: Option<String>,

    /// Bearer credential used for org bootstrap
    pub token: Option<String>,
}

/// `[library]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LibrarySection {
    /// Path of the standard library, relative to the project root
    pub path: Option<String>,
}

/// `[validate]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidateSection {
    /// Default validation mode
    pub mode: Option<ValidateMode>,
}

impl ProjectConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a URL does not parse or is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.server.url {
            check_url("server.url", url)?;
        }
        if let Some(url) = &self.server.flexo.url {
            check_url("server.flexo.url", url)?;
        }
        if let Some(path) = &self.library.path {
            if path.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "library.path cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Get the configured backend.
    ///
    /// Defaults to `flexo`.
    pub fn backend(&self) -> Backend {
        self.server.backend.unwrap_or_default()
    }

    /// Get the modeling API base URL.
    ///
    /// Defaults to `http://localhost:8083`.
    pub fn server_url(&self) -> &str {
        self.server.url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    /// Get the standard library path.
    ///
    /// Defaults to `lib/SysML-v2-Release`.
    pub fn library_path(&self) -> &str {
        self.library.path.as_deref().unwrap_or(DEFAULT_LIBRARY_PATH)
    }

    /// Get the default validation mode.
    ///
    /// Defaults to `local`.
    pub fn validate_mode(&self) -> ValidateMode {
        self.validate.mode.unwrap_or_default()
    }

    /// Get the Flexo layer-1 URL.
    pub fn flexo_url(&self) -> &str {
        self.server.flexo.url.as_deref().unwrap_or(DEFAULT_FLEXO_URL)
    }

    /// Get the Flexo bearer credential.
    pub fn flexo_token(&self) -> &str {
        self.server
            .flexo
            .token
            .as_deref()
            .unwrap_or(DEFAULT_FLEXO_TOKEN)
    }

    /// Get the project name, if recorded.
    pub fn project_name(&self) -> Option<&str> {
        self.project.name.as_deref()
    }
}

fn check_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = reqwest::Url::parse(value)
        .map_err(|e| ConfigError::InvalidValue(format!("{} '{}': {}", key, value, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidValue(format!(
            "{} '{}': unsupported scheme '{}'",
            key, value, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ProjectConfig::default();
        assert_eq!(config.backend(), Backend::Flexo);
        assert_eq!(config.server_url(), "http://localhost:8083");
        assert_eq!(config.library_path(), "lib/SysML-v2-Release");
        assert_eq!(config.validate_mode(), ValidateMode::Local);
        assert_eq!(config.flexo_url(), DEFAULT_FLEXO_URL);
        assert_eq!(config.flexo_token(), DEFAULT_FLEXO_TOKEN);
        assert!(config.project_name().is_none());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config: ProjectConfig = toml::from_str(
            r#"
            [server]
            backend = "gearshift"
            "#,
        )
        .unwrap();

        assert_eq!(config.backend(), Backend::Gearshift);
        assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
        assert_eq!(config.validate_mode(), ValidateMode::Local);
    }

    #[test]
    fn nested_flexo_table() {
        let config: ProjectConfig = toml::from_str(
            r#"
            [server.flexo]
            url = "http://flexo:9000"
            token = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.flexo_url(), "http://flexo:9000");
        assert_eq!(config.flexo_token(), "secret");
    }

    #[test]
    fn invalid_mode_rejected() {
        let result: Result<ProjectConfig, _> = toml::from_str("[validate]\nmode = \"remote\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_keys_ignored() {
        let config: ProjectConfig =
            toml::from_str("[tooling]\neditor = \"code\"\n[server]\nport = 1\n").unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn bad_url_fails_validation() {
        let config = ProjectConfig {
            server: ServerSection {
                url: Some("localhost:8083".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_library_path_fails_validation() {
        let config = ProjectConfig {
            library: LibrarySection {
                path: Some("  ".to_string()),
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn roundtrip() {
        let config = ProjectConfig {
            project: ProjectSection {
                name: Some("satellite".to_string()),
            },
            server: ServerSection {
                backend: Some(Backend::Gearshift),
                url: Some("http://localhost:9000".to_string()),
                flexo: FlexoSection::default(),
            },
            library: LibrarySection::default(),
            validate: ValidateSection {
                mode: Some(ValidateMode::Server),
            },
        };

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: ProjectConfig = toml::from_str(&toml).unwrap();
        assert_eq!(config, parsed);
    }
}
