//! sysml-v2 - A CLI toolchain for SysML v2 model projects
//!
//! `sysml` scaffolds model projects, runs a local SysML v2 API server through
//! Docker Compose, and validates `.sysml` files either with a built-in
//! structural parser or against the server's `/parse` endpoint.
//!
//! # Architecture
//!
//! The codebase is layered; lower layers never call upward:
//!
//! - [`cli`] - Command-line interface layer (parses args, dispatches handlers)
//! - [`validate`] - Local and server validation with explicit fallback
//! - [`server`] - Compose file discovery and the Flexo bootstrap
//! - [`scaffold`] - Embedded project template and substitution
//! - [`git`] - Repository init and standard library clone
//! - [`api`] - Async client for the SysML v2 REST API
//! - [`parsing`] - Lexer, structural grammar and model discovery
//! - [`process`] - Subprocess runner with a recording mock
//! - [`core`] - Configuration, shared enums and path discovery
//! - [`ui`] - User interaction utilities
//!
//! # Failure Policy
//!
//! Advisory steps (git init, library clone, server bootstrap, status probes)
//! warn and continue. Configuration errors, missing inputs and failed writes
//! stop the command.

pub mod api;
pub mod cli;
pub mod core;
pub mod git;
pub mod parsing;
pub mod process;
pub mod scaffold;
pub mod server;
pub mod ui;
pub mod validate;
