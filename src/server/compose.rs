//! server::compose
//!
//! Compose file discovery and `docker compose` invocations.

use std::path::{Path, PathBuf};

use crate::core::paths;
use crate::core::types::Backend;
use crate::process::ProcessSpec;

/// Compose files probed in each ancestor directory, per backend, in order.
pub fn candidates(backend: Backend) -> &'static [&'static str] {
    match backend {
        Backend::Flexo => &["docker/docker-compose.yml"],
        Backend::Gearshift => &[
            "docker/docker-compose.gearshift.yml",
            "docker/docker-compose.yml",
        ],
    }
}

/// Find the compose file for `backend`, walking up from `start`.
pub fn find_compose_file(start: &Path, backend: Backend) -> Option<PathBuf> {
    let found = paths::find_upward(start, candidates(backend));
    tracing::debug!(?found, %backend, "compose file lookup");
    found
}

/// A `docker compose` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeAction {
    /// Start detached
    Up,
    /// Stop and remove containers
    Down,
    /// Show logs, following unless `follow` is false
    Logs { follow: bool },
    /// Pull images
    Pull,
    /// List containers
    Ps,
}

impl ComposeAction {
    /// Arguments after `docker compose -f <file>`.
    pub fn args(&self, backend: Backend) -> Vec<&'static str> {
        match self {
            ComposeAction::Up if backend.builds_images() => vec!["up", "-d", "--build"],
            ComposeAction::Up => vec!["up", "-d"],
            ComposeAction::Down => vec!["down"],
            ComposeAction::Logs { follow: true } => vec!["logs", "-f"],
            ComposeAction::Logs { follow: false } => vec!["logs"],
            ComposeAction::Pull => vec!["pull"],
            ComposeAction::Ps => vec!["ps"],
        }
    }
}

/// Build `docker compose -f <file> <action args>`.
///
/// Output streams to the terminal.
pub fn compose_command(file: &Path, action: ComposeAction, backend: Backend) -> ProcessSpec {
    ProcessSpec::new("docker")
        .args(["compose", "-f"])
        .arg(file.to_string_lossy())
        .args(action.args(backend))
}
