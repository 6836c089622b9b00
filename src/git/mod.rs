//! git
//!
//! Repository setup for new projects.
//!
//! # Responsibilities
//!
//! - Initializing the project repository (`git2`, no external `git` needed)
//! - Cloning the SysML v2 standard library
//!
//! The library clone shells out to `git` through a [`ProcessRunner`]: the
//! vendored libgit2 is built without HTTPS transport support, and the clone
//! is shallow (`--depth 1`), which libgit2 does not offer either.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::process::{ProcessError, ProcessRunner, ProcessSpec};

/// Upstream repository of the SysML v2 standard library.
pub const LIBRARY_REPO_URL: &str = "https://github.com/Systems-Modeling/SysML-v2-Release.git";

/// Errors from repository setup.
#[derive(Debug, Error)]
pub enum GitError {
    /// `git2` could not create the repository.
    #[error("failed to initialize repository at {path}: {message}")]
    Init { path: PathBuf, message: String },

    /// The `git` program could not be started.
    #[error(transparent)]
    Spawn(#[from] ProcessError),

    /// `git clone` ran but did not succeed.
    #[error("git clone exited with code {code}{}", format_stderr(.stderr))]
    CloneFailed { code: i32, stderr: String },
}

fn format_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// Whether `dir` already has a `.git` entry.
pub fn is_repository(dir: &Path) -> bool {
    dir.join(".git").exists()
}

/// Initialize a repository in `dir` unless one exists.
///
/// Returns `true` if a repository was created.
pub fn init_repository(dir: &Path) -> Result<bool, GitError> {
    if is_repository(dir) {
        return Ok(false);
    }
    git2::Repository::init(dir).map_err(|e| GitError::Init {
        path: dir.to_path_buf(),
        message: e.message().to_string(),
    })?;
    tracing::debug!(path = %dir.display(), "initialized git repository");
    Ok(true)
}

/// The shallow clone invocation for the standard library.
pub fn clone_command(dest: &Path) -> ProcessSpec {
    ProcessSpec::new("git")
        .args(["clone", "--depth", "1", LIBRARY_REPO_URL])
        .arg(dest.to_string_lossy())
        .captured()
}

/// Clone the standard library into `dest`.
///
/// # Errors
///
/// Returns `GitError::Spawn` if `git` is not installed and
/// `GitError::CloneFailed` if it exits non-zero.
pub fn clone_library(runner: &dyn ProcessRunner, dest: &Path) -> Result<(), GitError> {
    let output = runner.run(&clone_command(dest))?;
    if output.success() {
        Ok(())
    } else {
        Err(GitError::CloneFailed {
            code: output.code,
            stderr: output.stderr,
        })
    }
}
