//! kodiview - web-based library browser for Kodi media centers
//!
//! Serves the REST API the web UI talks to; the Kodi instance itself is
//! reached over JSON-RPC through a cached, deduplicated client.

use anyhow::Result;
use kodiview::api;
use kodiview::config;
use kodiview::library::{cache, KodiClient};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "kodiview=debug,tower_http=debug,axum::rejection=trace".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting kodiview");

    // Load configuration
    let config = config::load_config()?;
    tracing::info!(
        kodi = %config.kodi.endpoint(),
        authenticated = config.kodi.username.is_some(),
        "Configuration loaded"
    );

    // Library client with its response cache
    let kodi = Arc::new(KodiClient::new(&config.kodi));

    // Cache sweeper runs for the life of the process
    let shutdown = CancellationToken::new();
    let sweeper = cache::spawn_gc(kodi.cache().clone(), shutdown.clone());

    // Build API routes
    let state = api::AppState::new(kodi, &config.kodi);
    let app = api::router(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    shutdown.cancel();
    sweeper.await?;

    Ok(())
}
