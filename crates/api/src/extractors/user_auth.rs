//! Session token extractors.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::services::AuthProviderError;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::{bearer_token, UserAuth};

#[async_trait]
impl FromRequestParts<AppState> for UserAuth {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(auth) = parts.extensions.get::<UserAuth>() {
            return Ok(auth.clone());
        }

        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".into()))?;

        UserAuth::validate(&state.jwt, token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".into()))
    }
}

/// The session's signed-in account as the splash check sees it.
///
/// No token means nobody is signed in; a token that fails validation is
/// reported as a provider error rather than rejected.
#[derive(Debug, Clone)]
pub struct SessionUser(pub Result<Option<String>, AuthProviderError>);

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            return Ok(SessionUser(Ok(None)));
        };

        let current = UserAuth::validate(&state.jwt, token)
            .map(|auth| Some(auth.user_id))
            .map_err(|e| AuthProviderError::InvalidToken(e.to_string()));
        Ok(SessionUser(current))
    }
}
