//! Application startup and server initialization.
//!
//! This module handles the creation and configuration of the HTTP server,
//! including the metrics registry, the load simulator, and route setup.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::metrics::Metrics;
use crate::routes;
use crate::simulation::LoadSimulator;
use crate::state::AppState;

/// Initializes and runs the exporter server.
///
/// Builds the metrics registry, spawns the synthetic load generator, and
/// starts serving the configured routes. Binds to the address specified in
/// the configuration.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the specified address
/// or encounters a runtime error during execution.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Metrics::new();

    LoadSimulator::new(metrics.clone(), config.simulation.clone()).spawn();

    info!("Starting server on {}", config.bind_address);

    let state = AppState {
        config: config.clone(),
        metrics,
    };

    let app = routes::create_router(state);

    let listener = TcpListener::bind(&config.bind_address).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
