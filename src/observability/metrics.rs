//! Metrics collection and exposition.
//!
//! # Metrics
//! - `shell_navigations_total` (counter): completed navigations by route path
//! - `shell_view_loads_total` (counter): view loader runs by route path, outcome
//! - `shell_requests_total` (counter): host server responses by status
//!
//! # Design Decisions
//! - Labels use the declared route path, never the raw request path, so
//!   cardinality stays bounded

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_navigation(route: &str) {
    counter!("shell_navigations_total", "route" => route.to_string()).increment(1);
}

pub fn record_view_load(route: &str, outcome: &'static str) {
    counter!(
        "shell_view_loads_total",
        "route" => route.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_request(status: u16) {
    counter!("shell_requests_total", "status" => status.to_string()).increment(1);
}
