//! HTTP route definitions and handlers.
//!
//! This module organizes all HTTP endpoints into logical groups:
//! the metrics exposition endpoint, health checks, and the sample API
//! endpoints that generate instrumented traffic.

mod api_routes;
mod health_routes;
mod metrics_routes;

use crate::metrics;
use crate::state::AppState;
use axum::middleware::from_fn_with_state;
use axum::Router;

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router, wraps them in the
/// request instrumentation middleware, and attaches the application state
/// for access in handlers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(api_routes::routes())
        .merge(health_routes::routes())
        .merge(metrics_routes::routes())
        .layer(from_fn_with_state(
            state.metrics.clone(),
            metrics::track_requests,
        ))
        .with_state(state)
}
