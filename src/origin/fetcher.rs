//! Outbound origin fetch.
//!
//! # Responsibilities
//! - Issue exactly one GET per inbound request (no retries)
//! - Relay User-Agent, If-Modified-Since, X-Forwarded-For
//! - Enforce connect/total timeouts and the source size cap
//! - Hand back the body with its declared Content-Type and Last-Modified

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, CONTENT_TYPE, IF_MODIFIED_SINCE, LAST_MODIFIED};
use reqwest::StatusCode;

use crate::config::FetchConfig;
use crate::error::{ProxyError, ProxyResult};
use crate::origin::target::{ForwardedHeaders, OriginTarget};

/// A successfully downloaded source image.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    /// Declared `Content-Type` (empty when the origin sent none).
    pub content_type: String,
    /// Origin `Last-Modified`, verbatim.
    pub last_modified: Option<String>,
    pub bytes: Vec<u8>,
}

/// What the origin answered.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Fetched(FetchedImage),
    /// Origin answered `304` to a forwarded `If-Modified-Since`.
    NotModified { last_modified: Option<String> },
}

/// HTTP client for origin requests. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    max_image_bytes: usize,
}

impl Fetcher {
    /// Build the shared client from configuration.
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            max_image_bytes: config.max_image_bytes,
        })
    }

    /// Download the image behind `target`.
    pub async fn fetch(
        &self,
        target: &OriginTarget,
        forwarded: &ForwardedHeaders,
    ) -> ProxyResult<FetchOutcome> {
        let mut request = self.client.get(target.url().clone());
        if let Some(value) = &forwarded.if_modified_since {
            request = request.header(IF_MODIFIED_SINCE, value);
        }
        if let Some(value) = &forwarded.x_forwarded_for {
            request = request.header("x-forwarded-for", value);
        }

        let mut response = request.send().await?;
        let status = response.status();
        let last_modified = header_string(response.headers(), LAST_MODIFIED);

        tracing::debug!(
            url = %target.url(),
            status = %status,
            content_length = ?response.content_length(),
            "Origin responded"
        );

        if status == StatusCode::NOT_MODIFIED {
            return Ok(FetchOutcome::NotModified { last_modified });
        }
        if !status.is_success() {
            return Err(ProxyError::Download(format!(
                "origin responded with {}",
                status
            )));
        }

        let content_type = header_string(response.headers(), CONTENT_TYPE).unwrap_or_default();

        if let Some(length) = response.content_length() {
            if length > self.max_image_bytes as u64 {
                return Err(self.too_large());
            }
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if bytes.len() + chunk.len() > self.max_image_bytes {
                return Err(self.too_large());
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(FetchOutcome::Fetched(FetchedImage {
            content_type,
            last_modified,
            bytes,
        }))
    }

    fn too_large(&self) -> ProxyError {
        ProxyError::Download(format!(
            "image exceeds {} bytes",
            self.max_image_bytes
        ))
    }
}

fn header_string(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
