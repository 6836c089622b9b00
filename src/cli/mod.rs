//! cli
//!
//! Command-line interface layer for the `sysml` toolchain.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialize diagnostics logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, builds a
//! [`Context`] from the global flags, and dispatches to a handler in
//! [`commands`]. Handlers return the process exit code.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::process::SystemRunner;
use crate::ui::output::Verbosity;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Interactive mode enabled.
    pub interactive: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            debug: false,
            quiet: false,
            interactive: true,
        }
    }
}

impl Context {
    /// Effective working directory.
    pub fn cwd(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    /// Resolve `path` against the working directory.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.cwd()?.join(path))
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// Install the tracing subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise `--debug` selects `debug`, `--quiet`
/// selects `warn`, and the default is `info`.
fn init_logging(debug: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::new("info")
    };

    // Ignore error if a subscriber is already set (e.g. in tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`. Returns the process
/// exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse_args();
    init_logging(cli.debug, cli.quiet);

    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        interactive: cli.interactive(),
    };
    tracing::debug!(?ctx, "starting");

    commands::dispatch(cli.command, &ctx, &SystemRunner)
}
