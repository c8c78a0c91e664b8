//! Safe zone routes. Only ACTIVE and SENSE accounts may create zones.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::geofence::CreateGeofenceRequest;
use domain::models::{Geofence, TierConfig};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::UserAuth;
use crate::routes::home::current_tier;
use crate::routes::pets::owned_pet;

async fn owned_geofence(
    state: &AppState,
    user_id: &str,
    geofence_id: &str,
) -> Result<Geofence, ApiError> {
    match state.geofences.get_geofence_by_id(geofence_id).await? {
        Some(geofence) if geofence.user_id == user_id => Ok(geofence),
        _ => Err(ApiError::NotFound("Geofence not found".into())),
    }
}

/// GET /api/v1/geofences
pub async fn list_geofences(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<Vec<Geofence>>, ApiError> {
    let geofences = state.geofences.get_geofences_by_user_id(&auth.user_id).await?;
    Ok(Json(geofences))
}

/// POST /api/v1/geofences
pub async fn create_geofence(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CreateGeofenceRequest>,
) -> Result<(StatusCode, Json<Geofence>), ApiError> {
    request.validate()?;

    let tier = current_tier(&state, &auth.user_id).await?;
    let config = TierConfig::for_tier(tier);
    if !config.is_geofencing_enabled {
        return Err(ApiError::Forbidden(
            "Geofencing requires ACTIVE or SENSE tier".into(),
        ));
    }

    let existing = state.geofences.get_geofences_by_user_id(&auth.user_id).await?;
    if !config.can_add_geofence(existing.len()) {
        return Err(ApiError::Forbidden(format!(
            "Geofence limit reached for {} tier ({})",
            tier, config.max_geofence_zones
        )));
    }

    owned_pet(&state, &auth.user_id, &request.pet_id).await?;

    let geofence_id = state
        .geofences
        .create_geofence(request.into_geofence(&auth.user_id))
        .await?;
    tracing::info!(user_id = %auth.user_id, geofence_id = %geofence_id, "Geofence created");

    let geofence = owned_geofence(&state, &auth.user_id, &geofence_id).await?;
    Ok((StatusCode::CREATED, Json(geofence)))
}

/// GET /api/v1/geofences/:geofence_id
pub async fn get_geofence(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(geofence_id): Path<String>,
) -> Result<Json<Geofence>, ApiError> {
    owned_geofence(&state, &auth.user_id, &geofence_id).await.map(Json)
}

/// DELETE /api/v1/geofences/:geofence_id
pub async fn delete_geofence(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(geofence_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    owned_geofence(&state, &auth.user_id, &geofence_id).await?;
    state.geofences.delete_geofence(&geofence_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
