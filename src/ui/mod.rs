//! ui
//!
//! Terminal output and confirmations for `sysml`.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware printing and the validation error table
//! - [`prompts`] - Yes/no questions (`init` into a non-empty directory,
//!   cloning the standard library)
//!
//! Prompts never block without a terminal: with `--no-interactive`, `--quiet`
//! or a redirected stdin they return `PromptError::NotInteractive` and the
//! command picks its non-interactive default.

pub mod output;
pub mod prompts;
