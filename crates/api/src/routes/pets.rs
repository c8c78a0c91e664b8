//! Pet registration and profile routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::pet::{CreatePetRequest, UpdatePetRequest};
use domain::models::{DeviceInfo, Pet, TierConfig};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_pet_created;
use crate::middleware::UserAuth;
use crate::routes::home::current_tier;

/// Loads a pet the caller owns. Other users' pets read as missing.
pub(crate) async fn owned_pet(state: &AppState, user_id: &str, pet_id: &str) -> Result<Pet, ApiError> {
    match state.pets.get_pet_by_id(pet_id).await? {
        Some(pet) if pet.user_id == user_id => Ok(pet),
        _ => Err(ApiError::NotFound("Pet not found".into())),
    }
}

/// GET /api/v1/pets
pub async fn list_pets(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<Vec<Pet>>, ApiError> {
    let pets = state.pets.get_pets_by_user_id(&auth.user_id).await?;
    Ok(Json(pets))
}

/// POST /api/v1/pets
pub async fn create_pet(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CreatePetRequest>,
) -> Result<(StatusCode, Json<Pet>), ApiError> {
    request.validate()?;

    let tier = current_tier(&state, &auth.user_id).await?;
    let config = TierConfig::for_tier(tier);
    let existing = state.pets.get_pets_by_user_id(&auth.user_id).await?;
    if !config.can_add_pet(existing.len()) {
        return Err(ApiError::Forbidden(format!(
            "Pet limit reached for {} tier ({})",
            tier, config.max_pets
        )));
    }

    let pet_id = state.pets.create_pet(request.into_pet(&auth.user_id)).await?;
    record_pet_created();
    tracing::info!(user_id = %auth.user_id, pet_id = %pet_id, "Pet registered");

    let pet = owned_pet(&state, &auth.user_id, &pet_id).await?;
    Ok((StatusCode::CREATED, Json(pet)))
}

/// GET /api/v1/pets/:pet_id
pub async fn get_pet(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(pet_id): Path<String>,
) -> Result<Json<Pet>, ApiError> {
    owned_pet(&state, &auth.user_id, &pet_id).await.map(Json)
}

/// PUT /api/v1/pets/:pet_id
pub async fn update_pet(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(pet_id): Path<String>,
    Json(request): Json<UpdatePetRequest>,
) -> Result<Json<Pet>, ApiError> {
    request.validate()?;

    let mut pet = owned_pet(&state, &auth.user_id, &pet_id).await?;
    request.apply(&mut pet);
    state.pets.update_pet(pet).await?;

    owned_pet(&state, &auth.user_id, &pet_id).await.map(Json)
}

/// DELETE /api/v1/pets/:pet_id
pub async fn delete_pet(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(pet_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    owned_pet(&state, &auth.user_id, &pet_id).await?;
    state.pets.delete_pet(&pet_id).await?;
    tracing::info!(user_id = %auth.user_id, pet_id = %pet_id, "Pet deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/pets/:pet_id/device
pub async fn update_pet_device(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(pet_id): Path<String>,
    Json(device): Json<DeviceInfo>,
) -> Result<Json<Pet>, ApiError> {
    device.validate()?;

    owned_pet(&state, &auth.user_id, &pet_id).await?;
    state.pets.update_pet_device(&pet_id, device).await?;

    owned_pet(&state, &auth.user_id, &pet_id).await.map(Json)
}
