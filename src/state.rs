//! Shared application state.
//!
//! Contains the state that is shared across all request handlers,
//! including configuration and the metrics collector.

use crate::config::ConfigV1;
use crate::metrics::Metrics;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// This state is cloned for each request handler and contains
/// references to the configuration and the metrics registry.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Metrics registry and recorders for the exporter.
    pub metrics: Metrics,
}
