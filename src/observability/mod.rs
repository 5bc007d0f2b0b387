//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request path produces:
//!     → logging.rs (structured tracing events, request_id field)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
