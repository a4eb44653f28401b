use std::sync::Arc;

use app_exporter::config::{Config, ConfigV1};
use app_exporter::metrics::Metrics;
use app_exporter::routes::create_router;
use app_exporter::state::AppState;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::Router;
use figment::{
    providers::{Format, Yaml},
    Figment,
};

pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
bind_address: "127.0.0.1:0"
logging:
  level: "debug"
  format: "console"
simulation:
  enabled: false
  active_users_interval_secs: 5
  database_connections_interval_secs: 10
  business_transactions_interval_secs: 15
"#;

pub fn load_test_config() -> ConfigV1 {
    let config: Config = Figment::new()
        .merge(Yaml::string(TEST_CONFIG))
        .extract()
        .expect("failed to parse test configuration");
    let Config::ConfigV1(config) = config;
    config
}

/// Builds the full application router plus a handle on its metrics, so
/// tests can drive requests and inspect what was recorded.
pub fn build_app() -> (Router, Metrics) {
    let config = Arc::new(load_test_config());
    let metrics = Metrics::new();

    let state = AppState {
        config,
        metrics: metrics.clone(),
    };

    (create_router(state), metrics)
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}
