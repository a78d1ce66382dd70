//! Relay service implementation.

use std::sync::Arc;

use tracing::info;

use super::error::RelayError;
use crate::fetch::{RemoteFetcher, parse_url};
use crate::naming::filename_from_url;
use crate::storage::{Artifact, StorageService};

/// Stores uploaded and fetched files.
#[derive(Debug, Clone)]
pub struct RelayService {
    storage: Arc<StorageService>,
    fetcher: Arc<RemoteFetcher>,
}

impl RelayService {
    /// Create a relay service.
    #[must_use]
    pub fn new(storage: Arc<StorageService>, fetcher: Arc<RemoteFetcher>) -> Self {
        Self { storage, fetcher }
    }

    /// Store bytes received directly from the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn store_upload(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<Artifact, RelayError> {
        let artifact = self.storage.store_bytes(original_name, bytes).await?;

        info!(
            stored_name = %artifact.stored_name,
            original_name = %artifact.original_name,
            size = artifact.size_bytes,
            "Stored uploaded file"
        );

        Ok(artifact)
    }

    /// Fetch `url` and store the body.
    ///
    /// The original name is the last segment of the URL path.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed, the fetch fails, or the
    /// file cannot be written.
    pub async fn store_from_url(&self, url: &str) -> Result<Artifact, RelayError> {
        let url = parse_url(url)?;
        let original_name = filename_from_url(&url);
        let source = url.to_string();

        let bytes = self.fetcher.fetch_url(url).await?;
        let artifact = self.storage.store_bytes(&original_name, &bytes).await?;

        info!(
            stored_name = %artifact.stored_name,
            original_name = %artifact.original_name,
            size = artifact.size_bytes,
            source = %source,
            "Stored fetched file"
        );

        Ok(artifact)
    }
}
