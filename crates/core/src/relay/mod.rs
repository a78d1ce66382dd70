//! Upload flows.
//!
//! Both upload modes end in the same [`StorageService::store_bytes`] call:
//! binary uploads hand over the received bytes, URL uploads hand over what
//! the [`RemoteFetcher`] returned.
//!
//! [`StorageService::store_bytes`]: crate::storage::StorageService::store_bytes
//! [`RemoteFetcher`]: crate::fetch::RemoteFetcher

mod error;
mod service;
mod types;

pub use error::RelayError;
pub use service::RelayService;
pub use types::PublicLinks;
