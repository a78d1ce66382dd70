//! Storage configuration types.

use std::path::PathBuf;

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding every artifact.
    pub root: PathBuf,
}

impl StorageConfig {
    /// Create a config rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}
