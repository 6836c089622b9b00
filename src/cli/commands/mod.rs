//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves paths against the context's working directory
//! 2. Loads `sysml.toml` once, if it needs configuration
//! 3. Calls the library layers and formats their results
//! 4. Returns the process exit code
//!
//! Subprocesses go through the [`ProcessRunner`] passed to [`dispatch`], so
//! handlers can be exercised with a recording runner.
//!
//! # Async Commands
//!
//! `serve` and `validate` perform network I/O through async clients. They
//! build a current-thread tokio runtime and `block_on` the async part, which
//! keeps the handlers themselves synchronous.

mod completion;
mod init;
mod serve;
mod validate;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use init::init;
pub use serve::serve;
pub use validate::validate;

use crate::cli::args::Command;
use crate::cli::Context;
use crate::process::ProcessRunner;
use anyhow::{Context as _, Result};

/// Dispatch a command to its handler and return its exit code.
pub fn dispatch(command: Command, ctx: &Context, runner: &dyn ProcessRunner) -> Result<i32> {
    match command {
        Command::Init {
            path,
            backend,
            yes,
            no_library,
        } => init::init(ctx, runner, &path, backend, yes, no_library),
        Command::Serve { backend, action } => serve::serve(ctx, runner, backend, action),
        Command::Validate { path, server } => validate::validate(ctx, &path, server),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Build the runtime for a command's async work.
fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}
