//! Tracker pairing and device management routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::device::{UpdateDeviceRequest, UpdateDeviceStatusRequest};
use domain::models::{Device, DeviceResponse, PairDeviceRequest, Tier};
use domain::services::AuthState;
use serde::Serialize;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_device_paired;
use crate::middleware::UserAuth;
use crate::routes::home::current_tier;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairDeviceResponse {
    pub device: DeviceResponse,
    pub tier: Tier,
    /// False when the device was stored but the profile kept its old tier.
    pub tier_updated: bool,
}

async fn owned_device(state: &AppState, user_id: &str, device_id: &str) -> Result<Device, ApiError> {
    match state.devices.get_device_by_id(device_id).await? {
        Some(device) if device.user_id == user_id => Ok(device),
        _ => Err(ApiError::NotFound("Device not found".into())),
    }
}

/// GET /api/v1/devices
pub async fn list_devices(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<Vec<DeviceResponse>>, ApiError> {
    let devices = state.devices.get_devices_by_user_id(&auth.user_id).await?;
    Ok(Json(devices.into_iter().map(DeviceResponse::from).collect()))
}

/// POST /api/v1/devices
///
/// Pairs a tracker with one of the caller's pets and moves the caller to
/// the device's tier.
pub async fn pair_device(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<PairDeviceRequest>,
) -> Result<(StatusCode, Json<PairDeviceResponse>), ApiError> {
    request.validate()?;

    let flow = state.auth_flow(current_tier(&state, &auth.user_id).await?);
    let paired = state
        .pairing()
        .pair_device(&flow, &auth.user_id, request)
        .await?;

    let tier_updated = matches!(paired.auth_state, AuthState::TierUpdated(_));
    if let AuthState::Error(message) = &paired.auth_state {
        tracing::warn!(user_id = %auth.user_id, error = %message, "Device paired without tier update");
    }
    record_device_paired(paired.tier);

    Ok((
        StatusCode::CREATED,
        Json(PairDeviceResponse {
            device: paired.device.into(),
            tier: paired.tier,
            tier_updated,
        }),
    ))
}

/// GET /api/v1/devices/:device_id
pub async fn get_device(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(device_id): Path<String>,
) -> Result<Json<DeviceResponse>, ApiError> {
    let device = owned_device(&state, &auth.user_id, &device_id).await?;
    Ok(Json(device.into()))
}

/// PUT /api/v1/devices/:device_id
pub async fn update_device(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(device_id): Path<String>,
    Json(request): Json<UpdateDeviceRequest>,
) -> Result<Json<DeviceResponse>, ApiError> {
    request.validate()?;

    let mut device = owned_device(&state, &auth.user_id, &device_id).await?;
    request.apply(&mut device);
    state.devices.update_device(device).await?;

    let device = owned_device(&state, &auth.user_id, &device_id).await?;
    Ok(Json(device.into()))
}

/// PATCH /api/v1/devices/:device_id/status
pub async fn update_device_status(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(device_id): Path<String>,
    Json(request): Json<UpdateDeviceStatusRequest>,
) -> Result<Json<DeviceResponse>, ApiError> {
    request.validate()?;

    owned_device(&state, &auth.user_id, &device_id).await?;
    state
        .devices
        .update_device_status(&device_id, request.status, request.battery_level)
        .await?;

    let device = owned_device(&state, &auth.user_id, &device_id).await?;
    Ok(Json(device.into()))
}

/// DELETE /api/v1/devices/:device_id
pub async fn delete_device(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(device_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    owned_device(&state, &auth.user_id, &device_id).await?;
    state.devices.delete_device(&device_id).await?;
    tracing::info!(user_id = %auth.user_id, device_id = %device_id, "Device removed");
    Ok(StatusCode::NO_CONTENT)
}
