//! Current user profile routes.

use axum::{extract::State, Json};
use domain::models::user::{CompleteProfileRequest, UpdateTierRequest, UpdateUserRequest};
use domain::models::{Tier, TierConfig, User};
use domain::services::{AuthState, Destination};
use serde::Serialize;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::UserAuth;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCompletedResponse {
    pub user: User,
    pub destination: Destination,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierUpdatedResponse {
    pub tier: Tier,
    pub config: TierConfig,
}

async fn load_user(state: &AppState, user_id: &str) -> Result<User, ApiError> {
    state
        .users
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User profile not found".into()))
}

/// GET /api/v1/users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<User>, ApiError> {
    load_user(&state, &auth.user_id).await.map(Json)
}

/// PUT /api/v1/users/me
///
/// Replaces the editable profile fields. Id, tier, subscription, family
/// membership and profile completion stay as stored; tiers only move
/// through device pairing.
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    request.validate()?;
    let mut user = load_user(&state, &auth.user_id).await?;

    request.apply(&mut user);
    state.users.update_user(user).await?;
    tracing::info!(user_id = %auth.user_id, "User profile replaced");

    load_user(&state, &auth.user_id).await.map(Json)
}

/// POST /api/v1/users/me/profile
pub async fn complete_profile(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CompleteProfileRequest>,
) -> Result<Json<ProfileCompletedResponse>, ApiError> {
    request.validate()?;
    let existing = load_user(&state, &auth.user_id).await?;

    let flow = state.auth_flow(existing.tier);
    let outcome = flow
        .complete_profile(&auth.user_id, request.into_updates())
        .await;

    match outcome {
        AuthState::ProfileCompleted => Ok(Json(ProfileCompletedResponse {
            user: load_user(&state, &auth.user_id).await?,
            destination: Destination::after_login(&outcome).unwrap_or(Destination::Main),
        })),
        AuthState::Error(message) => Err(ApiError::AuthFailed(message)),
        other => Err(ApiError::Internal(format!(
            "Unexpected auth state: {:?}",
            other
        ))),
    }
}

/// PUT /api/v1/users/me/tier
pub async fn update_tier(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<UpdateTierRequest>,
) -> Result<Json<TierUpdatedResponse>, ApiError> {
    request.validate()?;
    let existing = load_user(&state, &auth.user_id).await?;

    let flow = state.auth_flow(existing.tier);
    match flow
        .update_user_tier_after_pairing(&auth.user_id, &request.device_type)
        .await
    {
        AuthState::TierUpdated(tier) => Ok(Json(TierUpdatedResponse {
            tier,
            config: TierConfig::for_tier(tier),
        })),
        AuthState::Error(message) => Err(ApiError::AuthFailed(message)),
        other => Err(ApiError::Internal(format!(
            "Unexpected auth state: {:?}",
            other
        ))),
    }
}
