//! parsing::error
//!
//! Errors from loading and parsing model text.

use std::path::PathBuf;
use thiserror::Error;

/// A syntax error at a 1-based source position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Errors from [`load`](super::load) and [`loads`](super::loads).
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Syntax(#[from] ParseError),
}

impl ModelError {
    /// The syntax error, if this was one.
    pub fn syntax(&self) -> Option<&ParseError> {
        match self {
            ModelError::Syntax(e) => Some(e),
            ModelError::Io { .. } => None,
        }
    }
}
