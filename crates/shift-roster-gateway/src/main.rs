//! Shift Roster Gateway - HTTP API server
//!
//! This is the main entry point for the roster service. It opens the store,
//! wires the roster service into the router and serves until SIGINT or SIGTERM.
//!
//! Configuration is read from the environment; see
//! [`GatewayConfig::from_lookup`](shift_roster_gateway::GatewayConfig::from_lookup).

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shift_roster_control::{RosterConfig, RosterService};
use shift_roster_gateway::startup::{open_store, shutdown_signal};
use shift_roster_gateway::{create_router, GatewayConfig, GatewayState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,shift_roster=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Shift Roster Gateway");

    // Load configuration from environment
    let config = GatewayConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        data_dir = %config.data_dir.display(),
        cors_origins = ?config.cors_origins,
        "Gateway configuration loaded"
    );

    // Initialize RocksDB store
    let store = Arc::new(open_store(&config).await?);

    // Initialize roster service
    let roster_config = RosterConfig::default();
    tracing::info!(tasks = ?roster_config.tasks, "Roster service initialized");
    let roster = Arc::new(RosterService::new(store, roster_config));

    // Build gateway state and router
    let listen_addr = config.listen_addr.clone();
    let state = GatewayState::new(roster, config);
    let app = create_router(state);

    // Start HTTP server
    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}
