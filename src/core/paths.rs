//! core::paths
//!
//! Upward path discovery.
//!
//! Both the config file (`sysml.toml`) and the compose file
//! (`docker/docker-compose*.yml`) are located by walking from a starting
//! directory toward the filesystem root. All such walks go through
//! [`find_upward`] so they agree on how the start directory is resolved.
//!
//! # Example
//!
//! ```no_run
//! use sysml_v2::core::paths::find_upward;
//! use std::path::Path;
//!
//! if let Some(found) = find_upward(Path::new("."), &["sysml.toml"]) {
//!     println!("config at {}", found.display());
//! }
//! ```

use std::path::{Path, PathBuf};

/// Resolve `start` to an absolute path.
///
/// Symlinks are resolved when the path exists; otherwise the path is made
/// absolute against the process working directory.
pub fn resolve(start: &Path) -> PathBuf {
    start
        .canonicalize()
        .or_else(|_| std::path::absolute(start))
        .unwrap_or_else(|_| start.to_path_buf())
}

/// Walk from `start` up to the root, returning the first existing file that
/// matches one of `candidates` (relative paths, tried in order per directory).
///
/// A nearer directory always wins over a farther one, regardless of the
/// candidate order.
pub fn find_upward(start: &Path, candidates: &[&str]) -> Option<PathBuf> {
    let start = resolve(start);
    start.ancestors().find_map(|dir| {
        candidates
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}
