//! Bookstack Gateway - HTTP API for the records manager.
//!
//! This is the main entry point for the gateway service. It wires the
//! RocksDB store, the records service, and the cookie-session verifier
//! into a single HTTP server.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookstack_auth::StoreVerifier;
use bookstack_control::RecordsService;
use bookstack_gateway::{create_router, GatewayConfig, GatewayState};
use bookstack_store::RocksStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bookstack=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Bookstack Gateway");

    // Load configuration from environment
    let listen_addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "/data/bookstack".into());

    tracing::info!(
        listen_addr = %listen_addr,
        data_dir = %data_dir,
        "Gateway configuration loaded"
    );

    tracing::info!(path = %data_dir, "Opening RocksDB store");
    let store = Arc::new(RocksStore::open(&data_dir)?);

    let records = Arc::new(RecordsService::new(Arc::clone(&store)));
    let verifier = Arc::new(StoreVerifier::new(store));
    tracing::info!("Records service initialized");

    let gateway_config = GatewayConfig {
        listen_addr: listen_addr.clone(),
        ..GatewayConfig::default()
    };
    let state = GatewayState::new(records, verifier, gateway_config);

    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
