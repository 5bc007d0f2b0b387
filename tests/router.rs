//! In-process router tests (no sockets).

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use oyaki::config::OyakiConfig;
use oyaki::HttpServer;
use tower::ServiceExt;

fn router() -> axum::Router {
    HttpServer::new(OyakiConfig::default()).unwrap().router()
}

#[tokio::test]
async fn test_health_endpoint() {
    let res = router()
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = to_bytes(res.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let res = router()
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let id = res.headers()["x-request-id"].to_str().unwrap();
    assert_eq!(id.len(), 36, "expected a UUID, got {}", id);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let res = router()
        .oneshot(
            Request::get("/healthz")
                .header("x-request-id", "trace-me-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.headers()["x-request-id"], "trace-me-123");
}

#[tokio::test]
async fn test_rejections_never_reach_the_origin() {
    let res = router()
        .oneshot(
            Request::get("/?url=ftp%3A%2F%2Fexample.com%2Fa.jpg")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.headers()["content-type"], "text/plain; charset=utf-8");
    let body = to_bytes(res.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"Invalid url parameter");
}

#[tokio::test]
async fn test_only_get_is_routed() {
    let res = router()
        .oneshot(Request::post("/a.jpg").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}
