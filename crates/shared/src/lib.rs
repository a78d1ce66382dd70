//! Shared errors and configuration for the file relay.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, FetchConfig, Protocol, PublicConfig, ServerConfig, StorageSettings};
pub use error::AppError;
