//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (quality, timeouts, size cap)
//! - Validate addresses and the origin host shape
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: OyakiConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::OyakiConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),

    #[error("origin.scheme must be http or https, got `{0}`")]
    OriginScheme(String),

    #[error("origin.host `{0}` must be a bare host[:port]")]
    OriginHost(String),

    #[error("encode.quality must be between 1 and 100, got {0}")]
    Quality(u8),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("fetch.user_agent must be a valid header value")]
    UserAgent,

    #[error("timeouts.request_secs ({request}) must exceed fetch.timeout_secs ({fetch})")]
    RequestTimeout { request: u64, fetch: u64 },
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &OyakiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if !matches!(config.origin.scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::OriginScheme(config.origin.scheme.clone()));
    }

    if let Some(host) = &config.origin.host {
        if !is_bare_host(host) {
            errors.push(ValidationError::OriginHost(host.clone()));
        }
    }

    if !(1..=100).contains(&config.encode.quality) {
        errors.push(ValidationError::Quality(config.encode.quality));
    }

    if config.fetch.connect_timeout_secs == 0 {
        errors.push(ValidationError::Zero("fetch.connect_timeout_secs"));
    }
    if config.fetch.timeout_secs == 0 {
        errors.push(ValidationError::Zero("fetch.timeout_secs"));
    }
    if config.fetch.max_image_bytes == 0 {
        errors.push(ValidationError::Zero("fetch.max_image_bytes"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    } else if config.timeouts.request_secs <= config.fetch.timeout_secs {
        errors.push(ValidationError::RequestTimeout {
            request: config.timeouts.request_secs,
            fetch: config.fetch.timeout_secs,
        });
    }

    if reqwest::header::HeaderValue::from_str(&config.fetch.user_agent).is_err() {
        errors.push(ValidationError::UserAgent);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A host is "bare" when it carries no scheme, path, query or whitespace.
fn is_bare_host(host: &str) -> bool {
    !host.is_empty()
        && !host.contains("://")
        && !host
            .chars()
            .any(|c| matches!(c, '/' | '?' | '#' | '@') || c.is_whitespace())
}
