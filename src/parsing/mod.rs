//! parsing
//!
//! Local parsing facade for SysML v2 textual notation.
//!
//! # Modules
//!
//! - [`lexer`]: tokens and comments
//! - [`grammar`]: member and body structure
//! - [`model`]: the resulting element tree
//! - [`loader`]: model discovery and file loading
//! - [`error`]: [`ParseError`] and [`ModelError`]
//!
//! Only lexical and block structure are checked. Names, types and library
//! imports are not resolved; use server validation for that.

pub mod error;
pub mod grammar;
pub mod lexer;
pub mod loader;
pub mod model;

pub use error::{ModelError, ParseError};
pub use loader::{find_models, load, loads, MODEL_EXTENSION};
pub use model::{Element, Model};
