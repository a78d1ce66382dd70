//! Core logic for the file relay.
//!
//! This crate contains everything between the HTTP layer and the disk.
//! It has no web framework dependencies; the api crate owns routing.
//!
//! # Modules
//!
//! - `naming` - Stored-name generation and URL filename derivation
//! - `fetch` - Remote fetcher with bounded redirect following
//! - `storage` - The flat storage directory
//! - `relay` - Upload flows built on top of storage and fetch

pub mod fetch;
pub mod naming;
pub mod relay;
pub mod storage;
