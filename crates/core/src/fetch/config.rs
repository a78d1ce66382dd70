//! Remote fetcher configuration.

use std::time::Duration;

/// Remote fetcher configuration.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Redirects followed before failing with `TooManyRedirects`.
    pub max_redirects: usize,
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl FetcherConfig {
    /// Default redirect limit.
    pub const DEFAULT_MAX_REDIRECTS: usize = 5;

    /// Set the redirect limit.
    #[must_use]
    pub fn with_max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            max_redirects: Self::DEFAULT_MAX_REDIRECTS,
            timeout: None,
        }
    }
}
