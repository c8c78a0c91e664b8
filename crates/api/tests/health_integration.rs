//! Probes, request ids and the metrics endpoint.

mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use common::{send, spawn_app};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_reports_in_memory_storage() {
    let app = spawn_app();

    let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"]["backend"], "in-memory");
    assert_eq!(body["storage"]["connected"], true);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_liveness_and_readiness() {
    let app = spawn_app();

    let (status, body) = send(&app, Method::GET, "/api/health/live", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");

    let (status, body) = send(&app, Method::GET, "/api/health/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let app = spawn_app();
    let request = Request::builder()
        .uri("/api/health/live")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    let id = response.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = spawn_app();
    let request = Request::builder()
        .uri("/api/health/live")
        .header("x-request-id", "client-trace-42")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "client-trace-42");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = spawn_app();
    let request = Request::builder()
        .uri("/api/v1/unknown")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
