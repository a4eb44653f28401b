//! Metrics exposition endpoint.

use crate::metrics::TEXT_FORMAT;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};

/// Creates the metrics route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics_handler))
}

/// Handler for the /metrics endpoint.
///
/// Returns all collected metrics in the text exposition format. This
/// endpoint should be restricted via Ingress to prevent public access
/// when/if the exporter is exposed through an ingress.
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.metrics.refresh_process_metrics();
    let metrics_text = state.metrics.render();

    (
        StatusCode::OK,
        [("Content-Type", TEXT_FORMAT)],
        metrics_text,
    )
}
