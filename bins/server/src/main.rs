//! File relay server
//!
//! Main entry point for the relay service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relay_api::{AppState, create_router};
use relay_core::fetch::{FetcherConfig, RemoteFetcher};
use relay_core::relay::{PublicLinks, RelayService};
use relay_core::storage::{StorageConfig, StorageService};
use relay_shared::AppConfig;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "relay=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Storage directory must exist before the first request
    let storage = StorageService::from_config(StorageConfig::new(&config.storage.dir));
    storage
        .ensure_ready()
        .await
        .with_context(|| format!("failed to create {}", config.storage.dir.display()))?;
    info!(dir = %config.storage.dir.display(), "Storage directory ready");
    let storage = Arc::new(storage);

    // Remote fetcher for URL uploads
    let fetcher = RemoteFetcher::new(
        FetcherConfig::default()
            .with_max_redirects(config.fetch.max_redirects)
            .with_timeout(config.fetch.timeout_secs.map(Duration::from_secs)),
    )?;

    let links = PublicLinks::new(config.public_base_url());
    info!(
        protocol = %config.public.protocol,
        base_url = %links.base_url(),
        "Public links configured"
    );

    // Create application state
    let state = AppState {
        relay: Arc::new(RelayService::new(storage.clone(), Arc::new(fetcher))),
        storage,
        links: Arc::new(links),
        max_upload_bytes: config.storage.max_upload_bytes,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.listen_port());
    let listener = TcpListener::bind(&addr).await?;
    info!("File server running on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
