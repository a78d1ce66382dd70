//! Remote fetcher for URL uploads.
//!
//! Retrieves a whole response body over `http` or `https`, following at most
//! a bounded number of redirects. Anything but a final `200 OK` is an error.

mod client;
mod config;
mod error;

pub use client::{RemoteFetcher, parse_url};
pub use config::FetcherConfig;
pub use error::FetchError;
