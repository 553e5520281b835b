//! File discovery under a root directory.
//!
//! Replaces the `find -L <dir> ... -type f` calls the pipeline needs:
//! symlinks are followed so assets reachable only through a link are still
//! published, and only regular files are returned. Result order is whatever
//! the filesystem yields; consumers needing determinism sort themselves.

use glob::Pattern;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Files to ignore during directory traversal
pub const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Discovery-related errors
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("discovery root `{0}` does not exist")]
    RootNotFound(PathBuf),

    #[error("discovery root `{0}` is not traversable")]
    RootUnreadable(PathBuf, #[source] std::io::Error),

    #[error("invalid name pattern")]
    Pattern(#[from] glob::PatternError),
}

/// Constraints applied to a discovery walk, combined with logical AND.
#[derive(Debug, Default, Clone)]
pub struct Filters {
    max_depth: Option<usize>,
    name: Option<String>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit traversal depth. Depth 1 means files directly under the root.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Match file names against a glob pattern, e.g. `*.adoc`.
    pub fn name(mut self, pattern: &str) -> Self {
        self.name = Some(pattern.to_owned());
        self
    }
}

/// Discover regular files under `root` satisfying `filters`.
///
/// Symbolic links are followed. Each path is yielded at most once by the
/// walk, so the result contains no duplicates. No caching: every call
/// re-walks the tree.
///
/// # Errors
/// Fails if `root` is missing or unreadable, or the name pattern is
/// malformed. Unreadable entries below the root are skipped, matching the
/// tolerance of a `find` run over a partially broken tree.
pub fn discover(root: &Path, filters: &Filters) -> Result<Vec<PathBuf>, DiscoveryError> {
    match root.metadata() {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DiscoveryError::RootNotFound(root.to_path_buf()));
        }
        Err(e) => return Err(DiscoveryError::RootUnreadable(root.to_path_buf(), e)),
        Ok(_) => {}
    }

    let pattern = filters
        .name
        .as_deref()
        .map(Pattern::new)
        .transpose()?;

    let mut walk = WalkDir::new(root).follow_links(true);
    if let Some(depth) = filters.max_depth {
        walk = walk.max_depth(depth);
    }

    let files = walk
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .filter(|e| {
            pattern.as_ref().is_none_or(|p| {
                e.file_name()
                    .to_str()
                    .is_some_and(|name| p.matches(name))
            })
        })
        .map(|e| e.into_path())
        .collect();

    Ok(files)
}
