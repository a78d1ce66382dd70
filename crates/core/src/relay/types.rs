//! Link construction for stored artifacts.

/// Builds the public download and view links of stored artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicLinks {
    base_url: String,
}

impl PublicLinks {
    /// Create links under `base_url`, e.g. `http://host:3090`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Link that serves the artifact as an attachment.
    #[must_use]
    pub fn download_url(&self, stored_name: &str) -> String {
        format!("{}/files/{stored_name}", self.base_url)
    }

    /// Link that serves the artifact inline.
    #[must_use]
    pub fn view_url(&self, stored_name: &str) -> String {
        format!("{}/view/{stored_name}", self.base_url)
    }

    /// The base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
