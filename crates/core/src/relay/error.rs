//! Relay error types.

use thiserror::Error;

use crate::fetch::FetchError;
use crate::storage::StorageError;

/// Upload flow errors.
///
/// Messages are passed through unchanged so clients see the underlying
/// failure, e.g. `Failed to download: 404`.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Remote fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Storage operation failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
