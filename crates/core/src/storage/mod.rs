//! The storage directory.
//!
//! All artifacts live as flat files directly under one directory. There are
//! no sidecar files and no index: the directory listing is the only record
//! of what exists.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     StorageService                          │
//! ├────────────────────────────────────────────────────────────┤
//! │ ensure_ready()            │ store_bytes(name, bytes)        │
//! │ resolve(stored_name)      │ root()                          │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod service;

pub use config::StorageConfig;
pub use error::StorageError;
pub use service::{Artifact, StorageService};
