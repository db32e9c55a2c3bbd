//! Metrics collection and exposition.
//!
//! # Metrics
//! - `textboard_requests_total` (counter): requests by method, status
//! - `textboard_request_duration_seconds` (histogram): latency by method
//! - `textboard_submissions_total` (counter): POST outcomes
//! - `textboard_stored_posts` (gauge): posts retained after the last append
//! - `textboard_active_sessions` (gauge): live sessions
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    ::metrics::counter!(
        "textboard_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!(
        "textboard_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_submission(outcome: &'static str) {
    ::metrics::counter!("textboard_submissions_total", "outcome" => outcome).increment(1);
}

pub fn record_stored_posts(count: usize) {
    ::metrics::gauge!("textboard_stored_posts").set(count as f64);
}

pub fn record_active_sessions(count: usize) {
    ::metrics::gauge!("textboard_active_sessions").set(count as f64);
}

/// Middleware recording count and latency of every request.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let response = next.run(request).await;
    record_request(method.as_str(), response.status().as_u16(), start);
    response
}
