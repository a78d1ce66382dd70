//! Remote fetch error types.

use thiserror::Error;

/// Remote fetch errors.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be parsed.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The URL scheme is neither `http` nor `https`.
    #[error("Unsupported URL scheme '{0}'")]
    UnsupportedScheme(String),

    /// The remote answered with a non-200, non-redirect status.
    #[error("Failed to download: {0}")]
    Status(u16),

    /// The redirect chain exceeded the configured limit.
    #[error("Too many redirects (limit {max})")]
    TooManyRedirects {
        /// Configured redirect limit.
        max: usize,
    },

    /// Connection, DNS, TLS or body transfer failure.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The HTTP client could not be built.
    #[error("HTTP client configuration error: {0}")]
    Client(String),
}

impl FetchError {
    /// Create an invalid URL error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
