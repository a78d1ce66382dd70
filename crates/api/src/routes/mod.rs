//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod files;
pub mod health;
pub mod upload;

/// Creates the router with all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(upload::routes())
        .merge(files::routes())
}

#[cfg(test)]
pub(crate) mod test_support;
