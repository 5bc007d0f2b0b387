//! Request extraction.
//!
//! # Responsibilities
//! - Decide between path mode and url mode
//! - Parse and clamp the `quality` query parameter
//! - Pick the inbound headers that are relayed to the origin
//!
//! # Design Decisions
//! - A `url` query parameter selects url mode only when no origin host is set,
//!   or when `origin.allow_url_param` opts in
//! - Path mode uses the configured quality; `quality` is only read in url mode
//! - The origin host comes from ProxySettings, injected at server construction

use axum::http::header::{HeaderMap, IF_MODIFIED_SINCE};
use url::form_urlencoded;

use crate::config::{BodyEncoding, OyakiConfig};
use crate::error::{ProxyError, ProxyResult};
use crate::imaging::Quality;
use crate::origin::{ForwardedHeaders, OriginTarget};

/// Per-server settings the request path needs.
#[derive(Debug, Clone)]
pub struct ProxySettings {
    pub origin_host: Option<String>,
    pub origin_scheme: String,
    pub allow_url_param: bool,
    pub default_quality: Quality,
    pub body_encoding: BodyEncoding,
}

impl ProxySettings {
    /// Whether `?url=` may pick the fetch target.
    pub fn accepts_url_param(&self) -> bool {
        self.origin_host.is_none() || self.allow_url_param
    }
}

impl From<&OyakiConfig> for ProxySettings {
    fn from(config: &OyakiConfig) -> Self {
        Self {
            origin_host: config.origin.host.clone(),
            origin_scheme: config.origin.scheme.clone(),
            allow_url_param: config.origin.allow_url_param,
            default_quality: Quality::clamped(config.encode.quality.into()),
            body_encoding: config.encode.body_encoding,
        }
    }
}

/// Everything needed to serve one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub target: OriginTarget,
    pub quality: Quality,
    pub forwarded: ForwardedHeaders,
}

impl ImageRequest {
    /// Build from the inbound path, raw query string and headers.
    pub fn from_parts(
        path: &str,
        query: Option<&str>,
        headers: &HeaderMap,
        settings: &ProxySettings,
    ) -> ProxyResult<Self> {
        let forwarded = ForwardedHeaders::new(
            header_str(headers, IF_MODIFIED_SINCE.as_str()),
            header_str(headers, "x-forwarded-for"),
        );

        let params = QueryParams::parse(query.unwrap_or_default());
        let url_param = params.url.filter(|_| settings.accepts_url_param());

        let (target, quality) = match url_param {
            Some(raw_url) => {
                let quality = match params.quality.as_deref() {
                    Some(raw) => Quality::parse(raw)?,
                    None => settings.default_quality,
                };
                (OriginTarget::from_query(&raw_url)?, quality)
            }
            None => {
                let host = settings
                    .origin_host
                    .as_deref()
                    .ok_or(ProxyError::OriginNotConfigured)?;
                (
                    OriginTarget::from_path(&settings.origin_scheme, host, path)?,
                    settings.default_quality,
                )
            }
        };

        Ok(Self {
            target,
            quality,
            forwarded,
        })
    }
}

/// The query parameters the proxy understands. First occurrence wins.
#[derive(Debug, Default)]
struct QueryParams {
    url: Option<String>,
    quality: Option<String>,
}

impl QueryParams {
    fn parse(query: &str) -> Self {
        let mut params = QueryParams::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                "url" if params.url.is_none() => params.url = Some(value.into_owned()),
                "quality" if params.quality.is_none() => {
                    params.quality = Some(value.into_owned())
                }
                _ => {}
            }
        }
        params
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
