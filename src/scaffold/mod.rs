//! scaffold
//!
//! Project scaffolding from the embedded template tree.
//!
//! # Output mapping
//!
//! - Path components `gitignore` and `_vscode` become `.gitignore` and
//!   `.vscode`.
//! - `*.tpl` files are rendered (see [`render`]) and written without the
//!   suffix.
//! - Only the compose file for the chosen backend is written, always as
//!   `docker/docker-compose.yml`.

pub mod render;
pub mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::Backend;

/// Template path components renamed on output.
const RENAMES: &[(&str, &str)] = &[("gitignore", ".gitignore"), ("_vscode", ".vscode")];

/// Suffix of templates that receive variable substitution.
const TEMPLATE_SUFFIX: &str = ".tpl";

const COMPOSE_FILE: &str = "docker-compose.yml";
const GEARSHIFT_COMPOSE_FILE: &str = "docker-compose.gearshift.yml";

/// Errors from writing a scaffold.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Variables available to `*.tpl` templates.
#[derive(Debug, Clone)]
pub struct TemplateVars {
    pub project_name: String,
    pub backend: Backend,
}

impl TemplateVars {
    fn pairs(&self) -> [(&str, &str); 2] {
        [
            ("project_name", self.project_name.as_str()),
            ("backend", self.backend.as_str()),
        ]
    }
}

/// One file to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Path within the template tree
    pub source: &'static str,
    /// Output path relative to the project root
    pub target: PathBuf,
    /// Whether the contents are rendered before writing
    pub rendered: bool,
}

/// Map the template tree to output files for `backend`.
pub fn plan(backend: Backend) -> Vec<PlannedFile> {
    templates::TEMPLATES
        .iter()
        .filter_map(|(source, _)| plan_file(source, backend))
        .collect()
}

fn plan_file(source: &'static str, backend: Backend) -> Option<PlannedFile> {
    let file_name = source.rsplit('/').next().unwrap_or(source);
    let skipped = match backend {
        Backend::Flexo => GEARSHIFT_COMPOSE_FILE,
        Backend::Gearshift => COMPOSE_FILE,
    };
    if file_name == skipped {
        return None;
    }

    let rendered = source.ends_with(TEMPLATE_SUFFIX);
    let stripped = source.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(source);

    let mut target: PathBuf = stripped
        .split('/')
        .map(|part| {
            RENAMES
                .iter()
                .find(|(from, _)| *from == part)
                .map_or(part, |(_, to)| *to)
        })
        .collect();

    if file_name == GEARSHIFT_COMPOSE_FILE {
        target.set_file_name(COMPOSE_FILE);
    }

    Some(PlannedFile {
        source,
        target,
        rendered,
    })
}

/// Write the template tree into `dest`, creating directories as needed.
///
/// Existing files at target paths are overwritten. Returns the written
/// paths relative to `dest`.
///
/// # Errors
///
/// Returns the first directory or file that could not be written.
pub fn scaffold(dest: &Path, vars: &TemplateVars) -> Result<Vec<PathBuf>, ScaffoldError> {
    let pairs = vars.pairs();
    let mut written = Vec::new();

    for file in plan(vars.backend) {
        let contents = templates::get(file.source).unwrap_or_default();
        let out = dest.join(&file.target);

        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent).map_err(|source| ScaffoldError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let result = if file.rendered {
            fs::write(&out, render::render(contents, &pairs))
        } else {
            fs::write(&out, contents)
        };
        result.map_err(|source| ScaffoldError::Write {
            path: out.clone(),
            source,
        })?;

        tracing::debug!(path = %out.display(), "wrote template");
        written.push(file.target);
    }

    Ok(written)
}
