//! Sign-in, sign-up, password reset and token refresh.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::auth::{
    ConfirmPasswordResetRequest, GoogleSignInRequest, GoogleSignUpRequest, LoginRequest,
    PasswordResetRequest, RefreshTokenRequest, SignUpRequest,
};
use domain::models::{ApiResponse, Tier, User};
use domain::services::{AuthState, Destination};
use serde::Serialize;
use shared::jwt::TokenPair;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_sign_up;

/// Signed-in user with fresh session tokens and the next screen.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: User,
    pub tokens: TokenPair,
    pub destination: Destination,
}

fn issue_tokens(state: &AppState, user_id: &str) -> Result<TokenPair, ApiError> {
    state
        .jwt
        .issue_pair(user_id)
        .map_err(|e| ApiError::Internal(format!("Token error: {}", e)))
}

/// Turns a finished sign-in or sign-up into a response.
fn into_auth_response(
    state: &AppState,
    outcome: AuthState,
    route: fn(&AuthState) -> Option<Destination>,
    rejected: fn(String) -> ApiError,
) -> Result<AuthResponse, ApiError> {
    let destination = route(&outcome);
    match (outcome, destination) {
        (AuthState::Success(user), Some(destination)) => Ok(AuthResponse {
            tokens: issue_tokens(state, &user.user_id)?,
            user,
            destination,
        }),
        (AuthState::Error(message), _) => Err(rejected(message)),
        (other, _) => Err(ApiError::Internal(format!(
            "Unexpected auth state: {:?}",
            other
        ))),
    }
}

/// POST /api/v1/auth/signup
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;

    let flow = state.auth_flow(Tier::Tag);
    let outcome = flow
        .sign_up_with_email(
            request.full_name(),
            request.email(),
            request.phone_number(),
            &request.password,
        )
        .await;

    let response = into_auth_response(
        &state,
        outcome,
        Destination::after_sign_up,
        ApiError::AuthFailed,
    )?;
    record_sign_up("password");
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;

    let flow = state.auth_flow(Tier::Tag);
    let outcome = flow
        .sign_in_with_email(request.email(), &request.password)
        .await;

    into_auth_response(
        &state,
        outcome,
        Destination::after_login,
        ApiError::Unauthorized,
    )
    .map(Json)
}

/// POST /api/v1/auth/google
pub async fn google_sign_in(
    State(state): State<AppState>,
    Json(request): Json<GoogleSignInRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;

    let flow = state.auth_flow(Tier::Tag);
    let outcome = flow.sign_in_with_google(&request.id_token).await;

    into_auth_response(
        &state,
        outcome,
        Destination::after_login,
        ApiError::Unauthorized,
    )
    .map(Json)
}

/// POST /api/v1/auth/google/signup
pub async fn google_sign_up(
    State(state): State<AppState>,
    Json(request): Json<GoogleSignUpRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;

    let flow = state.auth_flow(Tier::Tag);
    let outcome = flow
        .sign_up_with_google(
            &request.id_token,
            request.display_name.trim(),
            request.email.trim(),
            request.photo_url.clone(),
        )
        .await;

    let response = into_auth_response(
        &state,
        outcome,
        Destination::after_sign_up,
        ApiError::AuthFailed,
    )?;
    record_sign_up("google");
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/password-reset
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(request): Json<PasswordResetRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    request.validate()?;

    let flow = state.auth_flow(Tier::Tag);
    match flow.reset_password(request.email()).await {
        AuthState::Error(message) => Err(ApiError::AuthFailed(message)),
        _ => Ok(Json(ApiResponse::acknowledged("Password reset email sent"))),
    }
}

/// POST /api/v1/auth/password-reset/confirm
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Json(request): Json<ConfirmPasswordResetRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    request.validate()?;

    let flow = state.auth_flow(Tier::Tag);
    match flow
        .confirm_password_reset(&request.token, &request.new_password)
        .await
    {
        AuthState::Error(message) => Err(ApiError::AuthFailed(message)),
        _ => Ok(Json(ApiResponse::acknowledged("Password has been reset"))),
    }
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    request.validate()?;

    let claims = state
        .jwt
        .validate_refresh_token(&request.refresh_token)
        .map_err(|e| {
            tracing::debug!(error = %e, "Refresh token rejected");
            ApiError::Unauthorized("Invalid or expired refresh token".into())
        })?;

    issue_tokens(&state, &claims.sub).map(Json)
}
