//! Request instrumentation middleware.

use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::metrics::recorder::{Metrics, MetricsRecorder};

/// Measures every request and records it once the response is ready.
///
/// Runs after the inner service resolves, so error responses are measured
/// the same way as successes. The matched route template is used as the
/// route label to keep cardinality bounded; unmatched requests fall back to
/// the raw path. Recording failures never surface into the response.
pub async fn track_requests(
    State(metrics): State<Metrics>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let response = next.run(request).await;

    let duration_secs = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();
    metrics.record_http_request(method.as_str(), &route, &status, duration_secs);

    response
}
