//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Name resolves outside the storage directory.
    #[error("invalid file name: {name}")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// No regular file under that name.
    #[error("file not found: {name}")]
    NotFound {
        /// The missing name.
        name: String,
    },

    /// Filesystem operation failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Create an invalid name error.
    #[must_use]
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }
}
