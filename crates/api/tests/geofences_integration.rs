//! Geofence zones are gated by tier.

mod common;

use axum::http::{Method, StatusCode};
use common::{create_pet, create_user, send, set_tier, spawn_app, TestApp, TestUser};
use serde_json::{json, Value};

fn zone(pet_id: &str, name: &str, radius: f64) -> Value {
    json!({
        "petId": pet_id,
        "name": name,
        "center": { "latitude": 48.1486, "longitude": 17.1077 },
        "radius": radius
    })
}

async fn create_zone(app: &TestApp, user: &TestUser, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/api/v1/geofences", user.token(), Some(body)).await
}

#[tokio::test]
async fn test_tag_tier_cannot_create_geofence() {
    let app = spawn_app();
    let user = create_user(&app).await;
    let pet = create_pet(&app, &user, "Biscuit").await;

    let (status, body) = create_zone(&app, &user, zone(pet["petId"].as_str().unwrap(), "Home", 100.0)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Geofencing requires ACTIVE or SENSE tier");
}

#[tokio::test]
async fn test_active_tier_creates_geofence() {
    let app = spawn_app();
    let user = create_user(&app).await;
    set_tier(&app, &user, "ACTIVE").await;
    let pet = create_pet(&app, &user, "Biscuit").await;

    let (status, body) = create_zone(&app, &user, zone(pet["petId"].as_str().unwrap(), "Home", 150.0)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Home");
    assert_eq!(body["radius"], 150.0);
    assert_eq!(body["userId"], user.user_id.as_str());
    assert_eq!(body["isActive"], true);

    let uri = format!("/api/v1/geofences/{}", body["geofenceId"].as_str().unwrap());
    let (status, fetched) = send(&app, Method::GET, &uri, user.token(), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["geofenceId"], body["geofenceId"]);
}

#[tokio::test]
async fn test_geofence_limit_per_tier() {
    let app = spawn_app();
    let user = create_user(&app).await;
    set_tier(&app, &user, "ACTIVE").await;
    let pet = create_pet(&app, &user, "Biscuit").await;
    let pet_id = pet["petId"].as_str().unwrap();

    for i in 0..5 {
        let (status, _) = create_zone(&app, &user, zone(pet_id, &format!("Zone {}", i), 100.0)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = create_zone(&app, &user, zone(pet_id, "Zone 5", 100.0)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Geofence limit reached for ACTIVE tier (5)");

    let (_, zones) = send(&app, Method::GET, "/api/v1/geofences", user.token(), None).await;
    assert_eq!(zones.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_geofence_radius_validation() {
    let app = spawn_app();
    let user = create_user(&app).await;
    set_tier(&app, &user, "SENSE").await;
    let pet = create_pet(&app, &user, "Biscuit").await;

    let (status, body) = create_zone(&app, &user, zone(pet["petId"].as_str().unwrap(), "Park", 5.0)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Radius must be between 20 and 1000 meters");
}

#[tokio::test]
async fn test_geofence_requires_owned_pet() {
    let app = spawn_app();
    let owner = create_user(&app).await;
    let other = create_user(&app).await;
    set_tier(&app, &other, "ACTIVE").await;
    let pet = create_pet(&app, &owner, "Biscuit").await;

    let (status, _) = create_zone(&app, &other, zone(pet["petId"].as_str().unwrap(), "Home", 100.0)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_other_users_geofence_is_not_found() {
    let app = spawn_app();
    let owner = create_user(&app).await;
    let other = create_user(&app).await;
    set_tier(&app, &owner, "ACTIVE").await;
    let pet = create_pet(&app, &owner, "Biscuit").await;
    let (_, created) = create_zone(&app, &owner, zone(pet["petId"].as_str().unwrap(), "Home", 100.0)).await;
    let uri = format!("/api/v1/geofences/{}", created["geofenceId"].as_str().unwrap());

    let (status, _) = send(&app, Method::GET, &uri, other.token(), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, other.token(), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, owner.token(), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &uri, owner.token(), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
