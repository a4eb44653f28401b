//! Metrics recording implementation for the exporter.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::metrics::counter::CounterVec;
use crate::metrics::desc::{HistogramOpts, Opts};
use crate::metrics::encoder::TextEncoder;
use crate::metrics::gauge::{Gauge, GaugeVec};
use crate::metrics::histogram::HistogramVec;
use crate::metrics::registry::Registry;

/// Buckets for HTTP request durations, in seconds.
const HTTP_DURATION_BUCKETS: &[f64] = &[0.1, 0.5, 1.0, 2.0, 5.0];

/// Trait for recording application metrics.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Records a completed HTTP request and its duration.
    fn record_http_request(&self, method: &str, route: &str, status: &str, duration_secs: f64);

    /// Sets the current number of active users.
    fn set_active_users(&self, count: f64);

    /// Sets the current number of open database connections.
    fn set_database_connections(&self, count: f64);

    /// Adds completed business transactions of the given type.
    fn add_business_transactions(&self, kind: &str, count: f64);
}

/// Application metrics collector.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    started_at: Instant,

    // Request metrics
    http_requests_total: CounterVec,
    http_request_duration_seconds: HistogramVec,

    // Business metrics
    active_users: Gauge,
    database_connections: Gauge,
    business_transactions_total: GaugeVec,

    // Process metrics
    process_uptime_seconds: Gauge,
}

impl Metrics {
    /// Creates a new metrics instance with its own registry.
    pub fn new() -> Self {
        let registry = Registry::new();

        // Request metrics
        let http_requests_total = registry
            .register_counter_vec(
                Opts::new("http_requests_total", "Total number of HTTP requests"),
                &["method", "route", "status"],
            )
            .expect("Failed to register http_requests_total");

        let http_request_duration_seconds = registry
            .register_histogram_vec(
                HistogramOpts::new(
                    "http_request_duration_seconds",
                    "Duration of HTTP requests in seconds",
                )
                .buckets(HTTP_DURATION_BUCKETS.to_vec()),
                &["method", "route", "status"],
            )
            .expect("Failed to register http_request_duration_seconds");

        // Business metrics
        let active_users = registry
            .register_gauge(Opts::new("active_users", "Number of active users"))
            .expect("Failed to register active_users");

        let database_connections = registry
            .register_gauge(Opts::new(
                "database_connections",
                "Number of active database connections",
            ))
            .expect("Failed to register database_connections");

        let business_transactions_total = registry
            .register_gauge_vec(
                Opts::new(
                    "business_transactions_total",
                    "Total number of business transactions",
                ),
                &["type"],
            )
            .expect("Failed to register business_transactions_total");

        // Process metrics
        let process_start_time_seconds = registry
            .register_gauge(Opts::new(
                "process_start_time_seconds",
                "Start time of the process since unix epoch in seconds",
            ))
            .expect("Failed to register process_start_time_seconds");
        if let Ok(since_epoch) = SystemTime::now().duration_since(UNIX_EPOCH) {
            process_start_time_seconds.set(since_epoch.as_secs_f64());
        }

        let process_uptime_seconds = registry
            .register_gauge(Opts::new(
                "process_uptime_seconds",
                "Time since process start in seconds",
            ))
            .expect("Failed to register process_uptime_seconds");

        Metrics {
            registry,
            started_at: Instant::now(),
            http_requests_total,
            http_request_duration_seconds,
            active_users,
            database_connections,
            business_transactions_total,
            process_uptime_seconds,
        }
    }

    /// Refreshes point-in-time process metrics. Called before each scrape.
    pub fn refresh_process_metrics(&self) {
        self.process_uptime_seconds
            .set(self.started_at.elapsed().as_secs_f64());
    }

    /// Renders all metrics in the text exposition format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .expect("Failed to encode metrics");
        String::from_utf8(buffer).expect("Metrics encoding produced invalid UTF-8")
    }
}

impl MetricsRecorder for Metrics {
    fn record_http_request(&self, method: &str, route: &str, status: &str, duration_secs: f64) {
        match self
            .http_requests_total
            .with_label_values(&[method, route, status])
        {
            Ok(counter) => counter.inc(),
            Err(e) => warn!("Failed to record http_requests_total: {}", e),
        }
        match self
            .http_request_duration_seconds
            .with_label_values(&[method, route, status])
        {
            Ok(histogram) => histogram.observe(duration_secs),
            Err(e) => warn!("Failed to record http_request_duration_seconds: {}", e),
        }
    }

    fn set_active_users(&self, count: f64) {
        self.active_users.set(count);
    }

    fn set_database_connections(&self, count: f64) {
        self.database_connections.set(count);
    }

    fn add_business_transactions(&self, kind: &str, count: f64) {
        match self.business_transactions_total.with_label_values(&[kind]) {
            Ok(gauge) => gauge.add(count),
            Err(e) => warn!("Failed to record business_transactions_total: {}", e),
        }
    }
}
