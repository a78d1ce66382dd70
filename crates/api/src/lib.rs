//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Upload and retrieval routes
//! - The upload payload extractor
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use relay_core::relay::{PublicLinks, RelayService};
use relay_core::storage::StorageService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upload flows.
    pub relay: Arc<RelayService>,
    /// Storage directory used for retrieval.
    pub storage: Arc<StorageService>,
    /// Public link builder for upload results.
    pub links: Arc<PublicLinks>,
    /// Request body limit for uploads, in bytes.
    pub max_upload_bytes: usize,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes())
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
