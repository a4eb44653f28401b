//! Health check endpoints.

use crate::state::AppState;
use axum::{response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

/// Registers health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Simple health check endpoint.
///
/// Returns a 200 OK status to indicate the service is running,
/// independently of the metrics registry.
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { status: "healthy" })
}
