//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the image proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OyakiConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Origin used in path mode.
    pub origin: OriginConfig,

    /// Outbound fetch settings.
    pub fetch: FetchConfig,

    /// JPEG output settings.
    pub encode: EncodeConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Origin server configuration.
///
/// `host` is optional: without it only query mode (`?url=`) is served.
/// With a host set, `?url=` is ignored unless `allow_url_param` is on.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OriginConfig {
    /// Origin host, optionally with port (e.g., "images.example.com").
    pub host: Option<String>,

    /// URL scheme used to reach the origin.
    pub scheme: String,

    /// Honor `?url=` even when `host` is set.
    pub allow_url_param: bool,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            host: None,
            scheme: "https".to_string(),
            allow_url_param: false,
        }
    }
}

/// Outbound fetch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User-Agent sent to the origin.
    pub user_agent: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total fetch timeout (connect + headers + body) in seconds.
    pub timeout_secs: u64,

    /// Largest source image accepted, in bytes.
    pub max_image_bytes: usize,

    /// Honor HTTP_PROXY / HTTPS_PROXY / NO_PROXY for origin requests.
    pub system_proxy: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "oyaki".to_string(),
            connect_timeout_secs: 5,
            timeout_secs: 30,
            max_image_bytes: 20 * 1024 * 1024, // 20MB
            system_proxy: true,
        }
    }
}

/// How the JPEG body is written into the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    /// Raw JPEG bytes.
    #[default]
    Raw,
    /// Standard base64 text, for API gateways that require text bodies.
    Base64,
}

/// JPEG output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EncodeConfig {
    /// Default JPEG quality (1-100).
    pub quality: u8,

    /// Response body encoding.
    pub body_encoding: BodyEncoding,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            quality: 90,
            body_encoding: BodyEncoding::Raw,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time to produce a response) in seconds.
    /// Must exceed `fetch.timeout_secs`.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 60 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: OyakiConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.origin.host, None);
        assert_eq!(config.origin.scheme, "https");
        assert!(!config.origin.allow_url_param);
        assert_eq!(config.encode.quality, 90);
        assert_eq!(config.encode.body_encoding, BodyEncoding::Raw);
        assert_eq!(config.fetch.user_agent, "oyaki");
    }

    #[test]
    fn test_partial_sections() {
        let config: OyakiConfig = toml::from_str(
            r#"
            [origin]
            host = "images.example.com"

            [encode]
            body_encoding = "base64"
            "#,
        )
        .unwrap();
        assert_eq!(config.origin.host.as_deref(), Some("images.example.com"));
        assert_eq!(config.origin.scheme, "https");
        assert_eq!(config.encode.quality, 90);
        assert_eq!(config.encode.body_encoding, BodyEncoding::Base64);
    }
}
