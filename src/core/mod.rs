//! core
//!
//! Core configuration types and path discovery for the toolchain.
//!
//! # Modules
//!
//! - [`types`] - Closed enums: Backend, ValidateMode
//! - [`config`] - `sysml.toml` schema and loading
//! - [`paths`] - Upward path discovery shared by config and compose lookup
//!
//! # Design Principles
//!
//! - Config is loaded once per command and passed by reference
//! - Enum-valued settings cannot hold unknown values
//! - Missing config is never an error; malformed config always is

pub mod config;
pub mod paths;
pub mod types;
