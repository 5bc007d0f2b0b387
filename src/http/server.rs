//! HTTP server setup and the image handler.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, tracing)
//! - Bound each image request by `timeouts.request_secs`, answered as a 400
//! - Build shared state (settings, origin client) once, at construction
//! - Run fetch → decode → encode → respond for every image request
//! - Serve until the shutdown signal fires

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::OyakiConfig;
use crate::error::{ProxyError, ProxyResult};
use crate::http::request::{ImageRequest, ProxySettings};
use crate::http::response::ProxyResponse;
use crate::imaging::{codec, SourceFormat};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::origin::{FetchOutcome, Fetcher};

/// Request header carrying the correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<ProxySettings>,
    pub fetcher: Fetcher,
    pub request_timeout: Duration,
}

/// HTTP server for the image proxy.
pub struct HttpServer {
    router: Router,
    config: OyakiConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only when the origin HTTP client cannot be built.
    pub fn new(config: OyakiConfig) -> Result<Self, reqwest::Error> {
        let state = AppState {
            settings: Arc::new(ProxySettings::from(&config)),
            fetcher: Fetcher::new(&config.fetch)?,
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/healthz", get(health_handler))
            .route("/", get(image_handler))
            .route("/{*path}", get(image_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = request_id(request),
                        )
                    }))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            origin_host = ?self.config.origin.host,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &OyakiConfig {
        &self.config
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Main image handler.
/// Resolves the origin, fetches, re-encodes as JPEG, and shapes the response.
async fn image_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request).to_string();

    let image_request = ImageRequest::from_parts(
        request.uri().path(),
        request.uri().query(),
        request.headers(),
        &state.settings,
    );

    let (mode, result) = match image_request {
        Ok(image_request) => {
            tracing::debug!(
                request_id = %request_id,
                mode = image_request.target.mode(),
                url = %image_request.target.url(),
                quality = image_request.quality.get(),
                "Re-encoding image"
            );
            (
                image_request.target.mode(),
                serve_within_deadline(&state, &image_request).await,
            )
        }
        Err(e) => ("rejected", Err(e)),
    };

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(
                request_id = %request_id,
                mode = mode,
                kind = e.kind(),
                error = %e,
                "Image request failed"
            );
            metrics::record_error(e.kind());
            ProxyResponse::from(e)
        }
    };

    metrics::record_request(mode, response.status.as_u16(), start_time);
    response.into_response()
}

async fn serve_within_deadline(
    state: &AppState,
    request: &ImageRequest,
) -> ProxyResult<ProxyResponse> {
    match tokio::time::timeout(state.request_timeout, serve_image(state, request)).await {
        Ok(result) => result,
        Err(_) => Err(ProxyError::Download(format!(
            "request timed out after {}s",
            state.request_timeout.as_secs()
        ))),
    }
}

async fn serve_image(state: &AppState, request: &ImageRequest) -> ProxyResult<ProxyResponse> {
    let fetched = match state.fetcher.fetch(&request.target, &request.forwarded).await? {
        FetchOutcome::Fetched(fetched) => fetched,
        FetchOutcome::NotModified { last_modified } => {
            return Ok(ProxyResponse::not_modified(last_modified.as_deref()));
        }
    };

    let format = SourceFormat::from_content_type(&fetched.content_type)
        .ok_or_else(|| ProxyError::UnsupportedImage(fetched.content_type.clone()))?;

    let source_len = fetched.bytes.len();
    tracing::debug!(
        format = format.as_str(),
        source_bytes = source_len,
        "Decoding source image"
    );
    let quality = request.quality;
    let bytes = fetched.bytes;
    let jpeg = tokio::task::spawn_blocking(move || codec::reencode(&bytes, format, quality))
        .await
        .map_err(|e| {
            ProxyError::Encode(image::ImageError::IoError(io::Error::other(format!(
                "codec task failed: {}",
                e
            ))))
        })??;

    metrics::record_sizes(source_len, jpeg.len());

    Ok(ProxyResponse::image(
        jpeg,
        fetched.last_modified.as_deref(),
        state.settings.body_encoding,
    ))
}

fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
