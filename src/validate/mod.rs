//! validate
//!
//! Model validation strategies.
//!
//! # Strategies
//!
//! - **Local**: every file goes through the built-in parser. All files are
//!   checked; one failure does not stop the run.
//! - **Server**: every file is posted to the API's `/parse` endpoint.
//!
//! # Fallback
//!
//! The server pass runs to completion or reports [`ServerPass::Unreachable`]
//! as soon as any request fails to connect. Partial server results are then
//! discarded and the whole file set is validated locally, so a report never
//! mixes server and local verdicts.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::api::{ApiError, SysmlClient};
use crate::core::types::ValidateMode;
use crate::parsing;

/// Request timeout for server validation.
pub const SERVER_TIMEOUT: Duration = Duration::from_secs(10);

/// A file that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub path: PathBuf,
    pub message: String,
}

impl ValidationError {
    fn new(path: &Path, message: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

/// Errors that prevent validation from starting.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("path '{0}' does not exist")]
    PathNotFound(PathBuf),
}

/// Where server-mode validation sends file text.
///
/// Implemented by [`SysmlClient`] against `POST /parse`.
#[async_trait]
pub trait RemoteParser: Send + Sync {
    /// `Ok(None)` when the text is accepted, `Ok(Some(message))` when it is
    /// rejected, `Err` when no answer was received.
    async fn parse(&self, text: &str) -> Result<Option<String>, ApiError>;
}

#[async_trait]
impl RemoteParser for SysmlClient {
    async fn parse(&self, text: &str) -> Result<Option<String>, ApiError> {
        SysmlClient::parse(self, text).await
    }
}

/// Outcome of the server pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerPass {
    /// Every file got an answer (or a non-connection error)
    Completed(Vec<ValidationError>),
    /// A connection failed; results so far were discarded
    Unreachable,
}

/// Result of a validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Mode whose verdicts the report carries
    pub mode: ValidateMode,
    /// Whether a server run fell back to local validation
    pub fell_back: bool,
    /// Number of files validated
    pub total: usize,
    /// Failed files, in input order
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn failed(&self) -> usize {
        self.errors.len()
    }

    pub fn passed(&self) -> usize {
        self.total - self.errors.len()
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Final summary line, e.g. `2 passed, 1 failed (3 total)`.
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed ({} total)",
            self.passed(),
            self.failed(),
            self.total
        )
    }
}

/// Files to validate for `target`: the file itself, or every model file
/// below a directory.
///
/// # Errors
///
/// Returns `ValidateError::PathNotFound` if `target` does not exist.
pub fn collect_files(target: &Path) -> Result<Vec<PathBuf>, ValidateError> {
    if target.is_file() {
        Ok(vec![target.to_path_buf()])
    } else if target.is_dir() {
        Ok(parsing::find_models(target))
    } else {
        Err(ValidateError::PathNotFound(target.to_path_buf()))
    }
}

/// Parse every file locally.
pub fn validate_local(files: &[PathBuf]) -> Vec<ValidationError> {
    files
        .iter()
        .filter_map(|path| match parsing::load(path) {
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "local validation failed");
                Some(ValidationError::new(path, e.to_string()))
            }
        })
        .collect()
}

/// Post every file to the server's `/parse` endpoint.
pub async fn validate_server(parser: &dyn RemoteParser, files: &[PathBuf]) -> ServerPass {
    let mut errors = Vec::new();

    for path in files {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                errors.push(ValidationError::new(
                    path,
                    format!("failed to read '{}': {}", path.display(), e),
                ));
                continue;
            }
        };

        match parser.parse(&text).await {
            Ok(None) => {}
            Ok(Some(message)) => errors.push(ValidationError::new(path, message)),
            Err(e) if e.is_unreachable() => {
                tracing::debug!(error = %e, "server unreachable during validation");
                return ServerPass::Unreachable;
            }
            Err(e) => errors.push(ValidationError::new(path, e.to_string())),
        }
    }

    ServerPass::Completed(errors)
}

/// Validate `files` in `mode`. Server mode falls back to a full local pass
/// when the server cannot be reached.
pub async fn validate(
    files: &[PathBuf],
    mode: ValidateMode,
    parser: &dyn RemoteParser,
) -> ValidationReport {
    let (mode, fell_back, errors) = match mode {
        ValidateMode::Local => (ValidateMode::Local, false, validate_local(files)),
        ValidateMode::Server => match validate_server(parser, files).await {
            ServerPass::Completed(errors) => (ValidateMode::Server, false, errors),
            ServerPass::Unreachable => (ValidateMode::Local, true, validate_local(files)),
        },
    };

    ValidationReport {
        mode,
        fell_back,
        total: files.len(),
        errors,
    }
}
