//! Tipjar Service - HTTP API for the donation ledger
//!
//! This is the main entry point for the tipjar service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tipjar_service::{create_router, AppState, ServiceConfig};
use tipjar_store::Store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tipjar=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Tipjar Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env()?;

    tracing::info!(
        listen_addr = %config.listen_addr,
        data_dir = %config.data_dir,
        tiers = config.tiers.len(),
        api_key_configured = config.service_api_key.is_some(),
        "Service configuration loaded"
    );

    let store = open_store(&config.data_dir)?;

    // Build app state
    let state = AppState::new(store, config.clone());

    // Create the router
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(feature = "rocksdb-backend")]
fn open_store(data_dir: &str) -> Result<Arc<dyn Store>, Box<dyn std::error::Error>> {
    tracing::info!(path = %data_dir, "Opening RocksDB store");
    Ok(Arc::new(tipjar_store::RocksStore::open(data_dir)?))
}

#[cfg(not(feature = "rocksdb-backend"))]
fn open_store(data_dir: &str) -> Result<Arc<dyn Store>, Box<dyn std::error::Error>> {
    tracing::warn!(
        path = %data_dir,
        "Built without rocksdb-backend - donations are kept in memory and lost on restart"
    );
    Ok(Arc::new(tipjar_store::MemoryStore::new()))
}
