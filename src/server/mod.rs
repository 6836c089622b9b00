//! server
//!
//! Local API server management.
//!
//! # Modules
//!
//! - [`compose`]: compose file discovery and `docker compose` command lines
//! - [`flexo`]: organization bootstrap after a Flexo stack starts

pub mod compose;
pub mod flexo;

pub use compose::{compose_command, find_compose_file, ComposeAction};
pub use flexo::{BootstrapOutcome, FlexoBootstrap, OrgStatus, PollPolicy};
