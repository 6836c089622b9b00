//! api
//!
//! Client for the SysML v2 Systems Modeling REST API.
//!
//! # Modules
//!
//! - [`client`]: [`SysmlClient`], one method per endpoint
//! - [`error`]: [`ApiError`], typed failure modes
//!
//! # Example
//!
//! ```no_run
//! use sysml_v2::api::SysmlClient;
//!
//! # async fn demo() -> Result<(), sysml_v2::api::ApiError> {
//! let client = SysmlClient::new("http://localhost:8083")?;
//! if client.healthy().await {
//!     for project in client.list_projects().await? {
//!         println!("{}", project["name"]);
//!     }
//! }
//! client.close();
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;

pub use client::{SysmlClient, DEFAULT_TIMEOUT};
pub use error::ApiError;
