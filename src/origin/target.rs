//! Origin URL resolution.
//!
//! # Modes
//! - Path: `{scheme}://{origin_host}{request_path}` from the configured host
//! - Url: absolute URL taken from the `url` query parameter

use url::Url;

use crate::error::{ProxyError, ProxyResult};

/// Where the source image lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginTarget {
    /// Derived from the request path and the configured origin host.
    Path { url: Url },
    /// Given explicitly by the caller.
    Url { url: Url },
}

impl OriginTarget {
    /// Compose the path-mode URL for `path` on `host`.
    pub fn from_path(scheme: &str, host: &str, path: &str) -> ProxyResult<Self> {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        let url = Url::parse(&format!("{}://{}{}", scheme, host, path))
            .map_err(|_| ProxyError::InvalidUrl)?;
        Ok(OriginTarget::Path { url })
    }

    /// Accept a caller-supplied URL. Only absolute http(s) URLs with a host qualify.
    pub fn from_query(raw: &str) -> ProxyResult<Self> {
        let url = Url::parse(raw).map_err(|_| ProxyError::InvalidUrl)?;

        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ProxyError::InvalidUrl);
        }
        Ok(OriginTarget::Url { url })
    }

    pub fn url(&self) -> &Url {
        match self {
            OriginTarget::Path { url } | OriginTarget::Url { url } => url,
        }
    }

    /// Label used in logs and metrics.
    pub fn mode(&self) -> &'static str {
        match self {
            OriginTarget::Path { .. } => "path",
            OriginTarget::Url { .. } => "url",
        }
    }
}

/// Inbound headers relayed to the origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardedHeaders {
    pub if_modified_since: Option<String>,
    pub x_forwarded_for: Option<String>,
}

impl ForwardedHeaders {
    /// Keep `If-Modified-Since` when non-empty and `X-Forwarded-For` when
    /// longer than a single byte.
    pub fn new(if_modified_since: Option<&str>, x_forwarded_for: Option<&str>) -> Self {
        Self {
            if_modified_since: if_modified_since
                .filter(|v| !v.is_empty())
                .map(str::to_string),
            x_forwarded_for: x_forwarded_for.filter(|v| v.len() > 1).map(str::to_string),
        }
    }
}
