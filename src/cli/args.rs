//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--no-interactive`: Never prompt
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::types::Backend;
use crate::ui::prompts;

/// SysML v2 toolchain - scaffold, serve and validate model projects
#[derive(Parser, Debug)]
#[command(name = "sysml")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if sysml was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns true if neither `--no-interactive` nor `--quiet` was set and
    /// stdin is a TTY.
    pub fn interactive(&self) -> bool {
        !(self.no_interactive || self.quiet) && prompts::stdin_is_terminal()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scaffold a new SysML v2 project
    #[command(
        name = "init",
        long_about = "Scaffold a new SysML v2 project.\n\n\
            Writes the project template (models, Docker Compose stack, editor \
            settings, sysml.toml) into PATH, initializes a git repository and \
            clones the SysML v2 standard library into lib/.",
        after_help = "\
WORKFLOW EXAMPLES:
    # New project in ./drone
    sysml init drone

    # Gearshift backend, no prompts
    sysml init drone --backend gearshift -y

    # Skip the standard library clone
    sysml init drone --no-library"
    )]
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// API server backend
        #[arg(long, value_enum, default_value_t = Backend::Flexo)]
        backend: Backend,

        /// Skip interactive prompts
        #[arg(short, long)]
        yes: bool,

        /// Do not clone the standard library
        #[arg(long)]
        no_library: bool,
    },

    /// Manage the local SysML v2 API server (Docker)
    #[command(
        name = "serve",
        after_help = "\
WORKFLOW EXAMPLES:
    # Start the stack and wait for the API
    sysml serve up

    # Is it running?
    sysml serve status

    # Use the gearshift compose file regardless of sysml.toml
    sysml serve --backend gearshift up"
    )]
    Serve {
        /// Override the backend from sysml.toml
        #[arg(long, value_enum)]
        backend: Option<Backend>,

        #[command(subcommand)]
        action: ServeAction,
    },

    /// Validate SysML v2 model files
    #[command(
        name = "validate",
        long_about = "Validate SysML v2 model files.\n\n\
            PATH can be a file or a directory (searched recursively for .sysml \
            files). Local validation checks lexical and block structure; \
            --server sends each file to the API server's /parse endpoint and \
            falls back to local validation if the server is unreachable."
    )]
    Validate {
        /// File or directory to validate
        #[arg(default_value = "models")]
        path: PathBuf,

        /// Validate via a running API server
        #[arg(long)]
        server: bool,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for sysml commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    sysml completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    sysml completion zsh >> ~/.zshrc

    # Fish
    sysml completion fish > ~/.config/fish/completions/sysml.fish

    # PowerShell
    sysml completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// `sysml serve` subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeAction {
    /// Start the API server
    Up,
    /// Stop the API server
    Down,
    /// Show API server logs
    Logs {
        /// Print current logs and exit instead of following
        #[arg(long)]
        no_follow: bool,
    },
    /// Pull latest Docker images
    Pull,
    /// Check if the API server is running
    Status,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
