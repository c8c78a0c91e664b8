//! Home screen and tier configuration for the signed-in user.

use axum::{extract::State, Json};
use domain::models::{Tier, TierConfig};
use domain::services::HomeSummary;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::UserAuth;

pub(crate) async fn current_tier(state: &AppState, user_id: &str) -> Result<Tier, ApiError> {
    state
        .users
        .get_user_by_id(user_id)
        .await?
        .map(|user| user.tier)
        .ok_or_else(|| ApiError::NotFound("User profile not found".into()))
}

/// GET /api/v1/home
pub async fn get_home(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<HomeSummary>, ApiError> {
    let tier = current_tier(&state, &auth.user_id).await?;
    Ok(Json(HomeSummary::for_tier(tier)))
}

/// GET /api/v1/tier
pub async fn get_tier(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<TierConfig>, ApiError> {
    let tier = current_tier(&state, &auth.user_id).await?;
    Ok(Json(TierConfig::for_tier(tier)))
}
