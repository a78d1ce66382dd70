//! Remote fetcher implementation using reqwest.

use bytes::Bytes;
use reqwest::header::LOCATION;
use reqwest::{Client, StatusCode, Url, redirect};
use tracing::debug;

use super::config::FetcherConfig;
use super::error::FetchError;

/// Parse `raw` and check that it uses a supported transport.
///
/// # Errors
///
/// Returns `InvalidUrl` for unparsable input and `UnsupportedScheme` for
/// anything other than `http`/`https`.
pub fn parse_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw).map_err(|e| FetchError::invalid_url(raw, e))?;
    ensure_supported_scheme(&url)?;
    Ok(url)
}

fn ensure_supported_scheme(url: &Url) -> Result<(), FetchError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

/// Fetches whole response bodies from remote URLs.
#[derive(Debug, Clone)]
pub struct RemoteFetcher {
    client: Client,
    config: FetcherConfig,
}

impl RemoteFetcher {
    /// Create a fetcher from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        // Redirects are followed by hand so the limit and error kind are ours.
        let mut builder = Client::builder().redirect(redirect::Policy::none());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Fetch the body behind `url`.
    ///
    /// # Errors
    ///
    /// See [`RemoteFetcher::fetch_url`]; additionally fails on a malformed URL.
    pub async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        self.fetch_url(parse_url(url)?).await
    }

    /// Fetch the body behind an already parsed URL.
    ///
    /// A 3xx response carrying a `Location` header is followed, resolved
    /// against the current URL. A 3xx without one is treated like any other
    /// non-200 status.
    ///
    /// # Errors
    ///
    /// Returns `Status` for a final status other than 200, `TooManyRedirects`
    /// once the chain exceeds the limit, and `Request` for transport failures.
    pub async fn fetch_url(&self, url: Url) -> Result<Bytes, FetchError> {
        ensure_supported_scheme(&url)?;

        let mut current = url;
        let mut redirects = 0;

        loop {
            let response = self.client.get(current.clone()).send().await?;
            let status = response.status();

            if status.is_redirection() {
                if let Some(location) = response.headers().get(LOCATION) {
                    if redirects >= self.config.max_redirects {
                        return Err(FetchError::TooManyRedirects {
                            max: self.config.max_redirects,
                        });
                    }

                    let location = location
                        .to_str()
                        .map_err(|e| FetchError::invalid_url(current.as_str(), e))?;
                    let next = current
                        .join(location)
                        .map_err(|e| FetchError::invalid_url(location, e))?;
                    ensure_supported_scheme(&next)?;

                    debug!(from = %current, to = %next, status = status.as_u16(), "Following redirect");
                    redirects += 1;
                    current = next;
                    continue;
                }
            }

            if status != StatusCode::OK {
                return Err(FetchError::Status(status.as_u16()));
            }

            let body = response.bytes().await?;
            debug!(url = %current, bytes = body.len(), redirects, "Fetched remote body");
            return Ok(body);
        }
    }
}
