//! Metrics collection and exposition.
//!
//! # Metrics
//! - `oyaki_requests_total` (counter): requests by mode, status
//! - `oyaki_request_duration_seconds` (histogram): latency by mode
//! - `oyaki_errors_total` (counter): failures by kind
//! - `oyaki_source_bytes` (histogram): fetched image size
//! - `oyaki_encoded_bytes` (histogram): JPEG output size
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op (tests, metrics disabled)

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(mode: &'static str, status: u16, start: Instant) {
    metrics::counter!("oyaki_requests_total", "mode" => mode, "status" => status.to_string())
        .increment(1);
    metrics::histogram!("oyaki_request_duration_seconds", "mode" => mode)
        .record(start.elapsed().as_secs_f64());
}

/// Record a failed request by error kind.
pub fn record_error(kind: &'static str) {
    metrics::counter!("oyaki_errors_total", "kind" => kind).increment(1);
}

/// Record source and output sizes of a successful re-encode.
pub fn record_sizes(source_bytes: usize, encoded_bytes: usize) {
    metrics::histogram!("oyaki_source_bytes").record(source_bytes as f64);
    metrics::histogram!("oyaki_encoded_bytes").record(encoded_bytes as f64);
}
