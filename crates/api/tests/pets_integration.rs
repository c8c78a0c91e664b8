//! Pet registration and profile routes.

mod common;

use axum::http::{Method, StatusCode};
use common::{create_pet, create_user, send, set_tier, spawn_app};
use serde_json::json;

#[tokio::test]
async fn test_create_and_list_pets() {
    let app = spawn_app();
    let user = create_user(&app).await;

    let pet = create_pet(&app, &user, "Biscuit").await;
    assert_eq!(pet["name"], "Biscuit");
    assert_eq!(pet["type"], "Dog");
    assert_eq!(pet["userId"], user.user_id.as_str());
    assert!(pet["createdAt"].is_string());

    let (status, pets) = send(&app, Method::GET, "/api/v1/pets", user.token(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pets.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_tag_tier_limited_to_one_pet() {
    let app = spawn_app();
    let user = create_user(&app).await;
    create_pet(&app, &user, "Biscuit").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/pets",
        user.token(),
        Some(json!({ "name": "Mochi", "type": "Cat" })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Pet limit reached for TAG tier (1)");
}

#[tokio::test]
async fn test_active_tier_allows_three_pets() {
    let app = spawn_app();
    let user = create_user(&app).await;
    set_tier(&app, &user, "ACTIVE").await;

    for name in ["Biscuit", "Mochi", "Pepper"] {
        create_pet(&app, &user, name).await;
    }

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/pets",
        user.token(),
        Some(json!({ "name": "Ziggy", "type": "Other" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_pet_validation() {
    let app = spawn_app();
    let user = create_user(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/pets",
        user.token(),
        Some(json!({ "name": "", "type": "Dog", "weight": 500.0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_pet() {
    let app = spawn_app();
    let user = create_user(&app).await;
    let pet = create_pet(&app, &user, "Biscuit").await;
    let uri = format!("/api/v1/pets/{}", pet["petId"].as_str().unwrap());

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        user.token(),
        Some(json!({ "breed": "Corgi", "weight": 11.5 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["breed"], "Corgi");
    assert_eq!(body["weight"], 11.5);
    assert_eq!(body["name"], "Biscuit");
}

#[tokio::test]
async fn test_other_users_pet_is_not_found() {
    let app = spawn_app();
    let owner = create_user(&app).await;
    let other = create_user(&app).await;
    let pet = create_pet(&app, &owner, "Biscuit").await;
    let uri = format!("/api/v1/pets/{}", pet["petId"].as_str().unwrap());

    let (status, _) = send(&app, Method::GET, &uri, other.token(), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, other.token(), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, &uri, owner.token(), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_pet() {
    let app = spawn_app();
    let user = create_user(&app).await;
    let pet = create_pet(&app, &user, "Biscuit").await;
    let uri = format!("/api/v1/pets/{}", pet["petId"].as_str().unwrap());

    let (status, _) = send(&app, Method::DELETE, &uri, user.token(), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &uri, user.token(), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_pet_device() {
    let app = spawn_app();
    let user = create_user(&app).await;
    let pet = create_pet(&app, &user, "Biscuit").await;
    let uri = format!("/api/v1/pets/{}/device", pet["petId"].as_str().unwrap());

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        user.token(),
        Some(json!({ "deviceId": "dev-1", "deviceType": "TAG", "batteryLevel": 80 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentDevice"]["deviceId"], "dev-1");
    assert_eq!(body["currentDevice"]["batteryLevel"], 80);

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        user.token(),
        Some(json!({ "deviceId": "dev-1", "batteryLevel": 140 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_pet_name_rejected() {
    let app = spawn_app();
    let user = create_user(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/pets",
        user.token(),
        Some(json!({ "name": "   ", "type": "Dog" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Pet name must be 1-50 characters");

    let (_, pets) = send(&app, Method::GET, "/api/v1/pets", user.token(), None).await;
    assert!(pets.as_array().unwrap().is_empty());
}
