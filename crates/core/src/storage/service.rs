//! Storage service implementation on the local filesystem.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::debug;

use super::config::StorageConfig;
use super::error::StorageError;
use crate::naming::generate_stored_name;

/// A stored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Generated on-disk name.
    pub stored_name: String,
    /// Name supplied by the uploader or derived from the URL.
    pub original_name: String,
    /// Size read back from the filesystem.
    pub size_bytes: u64,
}

/// Storage service for the flat artifact directory.
#[derive(Debug)]
pub struct StorageService {
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// Nothing touches the disk until [`StorageService::ensure_ready`].
    #[must_use]
    pub fn from_config(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Create the storage directory and missing parents. No-op if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn ensure_ready(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.config.root).await?;
        debug!(root = %self.config.root.display(), "Storage directory ready");
        Ok(())
    }

    /// Write `bytes` under a fresh name derived from `original_name`.
    ///
    /// An existing file at the generated path is replaced. The returned size
    /// comes from filesystem metadata, not from `bytes`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write or the metadata read fails.
    pub async fn store_bytes(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<Artifact, StorageError> {
        let stored_name = generate_stored_name(original_name);
        let path = self.config.root.join(&stored_name);

        fs::write(&path, bytes).await?;
        let size_bytes = fs::metadata(&path).await?.len();

        Ok(Artifact {
            stored_name,
            original_name: original_name.to_string(),
            size_bytes,
        })
    }

    /// Resolve a stored name to the canonical path of an existing file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` if the name, or the file it points to after
    /// symlink resolution, is not strictly inside the storage directory, and
    /// `NotFound` if no regular file exists there.
    pub async fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        let root = fs::canonicalize(&self.config.root).await?;
        let candidate = normalize(&root.join(name));

        if !is_strictly_inside(&root, &candidate) {
            return Err(StorageError::invalid_name(name));
        }

        let real = match fs::canonicalize(&candidate).await {
            Ok(real) => real,
            Err(e) if names_missing_file(e.kind()) => {
                return Err(StorageError::not_found(name));
            }
            Err(e) => return Err(e.into()),
        };

        if !is_strictly_inside(&root, &real) {
            return Err(StorageError::invalid_name(name));
        }

        if !fs::metadata(&real).await?.is_file() {
            return Err(StorageError::not_found(name));
        }

        Ok(real)
    }

    /// Get the storage directory as configured.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.config.root
    }

}

/// Lookup failures that mean no file by that name can exist.
fn names_missing_file(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::NotFound
            | ErrorKind::NotADirectory
            | ErrorKind::InvalidFilename
            | ErrorKind::InvalidInput
    )
}

/// Lexically resolve `.` and `..` components without touching the disk.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Component-wise containment; `root` itself does not count.
fn is_strictly_inside(root: &Path, path: &Path) -> bool {
    path != root && path.starts_with(root)
}
