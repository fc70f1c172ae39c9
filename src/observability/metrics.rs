//! Metrics collection and exposition.
//!
//! # Metrics
//! - `skewproxy_requests_total` (counter): requests by pool and status
//! - `skewproxy_request_duration_seconds` (histogram): latency
//! - `skewproxy_gateway_errors_total` (counter): upstream failures by pool
//!
//! # Design Decisions
//! - Recording is always on (atomic counter updates are cheap); the
//!   Prometheus endpoint itself is opt-in via config

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::StatusCode;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::Pool;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics endpoint listening"),
        Err(err) => tracing::error!(error = %err, "failed to install metrics exporter"),
    }
}

/// Record one proxied request.
pub fn record_request(pool: Pool, status: StatusCode, start: Instant) {
    counter!(
        "skewproxy_requests_total",
        "pool" => pool.label(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);
    histogram!("skewproxy_request_duration_seconds", "pool" => pool.label())
        .record(start.elapsed().as_secs_f64());
}

/// Record one upstream failure surfaced as a gateway error.
pub fn record_gateway_error(pool: Pool) {
    counter!("skewproxy_gateway_errors_total", "pool" => pool.label()).increment(1);
}
