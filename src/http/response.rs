//! Response shaping.
//!
//! # Responsibilities
//! - Package JPEG bytes, raw or base64, with image headers
//! - Propagate origin Last-Modified verbatim, or stamp the current time
//! - Turn every ProxyError into a 400 with a plain-text diagnostic
//!
//! # Design Decisions
//! - `Access-Control-Allow-Origin` carries the literal `*/*` existing clients expect
//! - The base64 flag travels with the body so the two never disagree

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};

use crate::config::BodyEncoding;
use crate::error::ProxyError;

/// Marks a base64 text body.
pub const X_BODY_ENCODING: HeaderName = HeaderName::from_static("x-body-encoding");

const ALLOW_ORIGIN_ANY: &str = "*/*";

/// A fully shaped proxy response.
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    /// True when `body` is the base64 text of the image bytes.
    pub is_base64_encoded: bool,
}

impl ProxyResponse {
    /// `200` carrying a re-encoded JPEG.
    pub fn image(jpeg: Vec<u8>, last_modified: Option<&str>, encoding: BodyEncoding) -> Self {
        let mut headers = base_headers(last_modified);
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/jpeg"));

        let (body, is_base64_encoded) = match encoding {
            BodyEncoding::Raw => (jpeg, false),
            BodyEncoding::Base64 => {
                headers.insert(X_BODY_ENCODING, HeaderValue::from_static("base64"));
                (STANDARD.encode(&jpeg).into_bytes(), true)
            }
        };

        Self {
            status: StatusCode::OK,
            headers,
            body,
            is_base64_encoded,
        }
    }

    /// `304` relayed from the origin.
    pub fn not_modified(last_modified: Option<&str>) -> Self {
        Self {
            status: StatusCode::NOT_MODIFIED,
            headers: base_headers(last_modified),
            body: Vec::new(),
            is_base64_encoded: false,
        }
    }

    /// `400` with the error's diagnostic text.
    pub fn error(err: &ProxyError) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );

        Self {
            status: StatusCode::BAD_REQUEST,
            headers,
            body: err.to_string().into_bytes(),
            is_base64_encoded: false,
        }
    }
}

impl From<ProxyError> for ProxyResponse {
    fn from(err: ProxyError) -> Self {
        ProxyResponse::error(&err)
    }
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        (self.status, self.headers, self.body).into_response()
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        ProxyResponse::from(self).into_response()
    }
}

fn base_headers(last_modified: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN_ANY),
    );

    let last_modified = last_modified
        .and_then(|v| HeaderValue::from_str(v).ok())
        .or_else(|| HeaderValue::from_str(&http_date(Utc::now())).ok());
    if let Some(value) = last_modified {
        headers.insert(header::LAST_MODIFIED, value);
    }

    headers
}

/// Format a timestamp as an IMF-fixdate (`Mon, 02 Jan 2006 15:04:05 GMT`).
pub fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
