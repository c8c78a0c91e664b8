//! Splash auth check.

mod common;

use axum::http::{Method, StatusCode};
use common::{create_user, send, spawn_app};
use serde_json::json;

#[tokio::test]
async fn test_session_without_token() {
    let app = spawn_app();

    let (status, body) = send(&app, Method::GET, "/api/v1/session", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["status"], "notAuthenticated");
    assert_eq!(body["destination"], "login");
    assert_eq!(body["minSplashDurationMs"], 3000);
}

#[tokio::test]
async fn test_session_new_user_needs_profile() {
    let app = spawn_app();
    let user = create_user(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/session", user.token(), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["status"], "authenticated");
    assert_eq!(body["state"]["needsProfileCompletion"], true);
    assert_eq!(body["destination"], "main");
}

#[tokio::test]
async fn test_session_after_profile_completion() {
    let app = spawn_app();
    let user = create_user(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/users/me/profile",
        user.token(),
        Some(json!({ "displayName": "Jane Walker" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/v1/session", user.token(), None).await;
    assert_eq!(body["state"]["needsProfileCompletion"], false);
}

#[tokio::test]
async fn test_session_with_invalid_token() {
    let app = spawn_app();

    let (status, body) = send(&app, Method::GET, "/api/v1/session", Some("not-a-jwt"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["status"], "error");
    assert!(body["state"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Authentication check failed"));
    assert_eq!(body["destination"], "login");
}
