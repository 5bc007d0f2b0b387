//! Request-path error type.
//!
//! Every variant surfaces to the caller as `400 Bad Request` with the
//! `Display` text as a plain-text body.

use thiserror::Error;

/// Errors that can occur while serving one image request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Origin unreachable, timed out, answered non-2xx, or sent too much.
    #[error("Failed to download image: {0}")]
    Download(String),

    /// Origin content type has no decoder.
    #[error("Not supported image: {0}")]
    UnsupportedImage(String),

    /// Bytes did not decode as the declared format.
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// JPEG encoder rejected the image.
    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    /// `quality` query parameter is not an integer.
    #[error("Invalid quality parameter")]
    InvalidQuality,

    /// `url` query parameter is not an absolute http(s) URL.
    #[error("Invalid url parameter")]
    InvalidUrl,

    /// Path mode requested but no origin host is configured.
    #[error("Origin host is not configured")]
    OriginNotConfigured,
}

impl ProxyError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::Download(_) => "download",
            ProxyError::UnsupportedImage(_) => "unsupported",
            ProxyError::Decode(_) => "decode",
            ProxyError::Encode(_) => "encode",
            ProxyError::InvalidQuality => "invalid_quality",
            ProxyError::InvalidUrl => "invalid_url",
            ProxyError::OriginNotConfigured => "origin_not_configured",
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Download(err.to_string())
    }
}

/// Result type for the request path.
pub type ProxyResult<T> = Result<T, ProxyError>;
