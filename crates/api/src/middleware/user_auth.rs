//! Session token authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::jwt::{JwtConfig, JwtError};

use crate::app::AppState;
use crate::error::ApiError;

/// Signed-in user taken from a valid access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAuth {
    /// Auth provider uid, also the user document id.
    pub user_id: String,
    pub jti: String,
}

impl UserAuth {
    pub fn validate(jwt: &JwtConfig, token: &str) -> Result<Self, JwtError> {
        let claims = jwt.validate_access_token(token)?;
        Ok(UserAuth {
            user_id: claims.sub,
            jti: claims.jti,
        })
    }
}

/// Token from an `Authorization: Bearer` header, if one is present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Rejects requests without a valid access token and stores the
/// [`UserAuth`] in request extensions.
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(req.headers()) else {
        return ApiError::Unauthorized("Missing or invalid Authorization header".into())
            .into_response();
    };

    match UserAuth::validate(&state.jwt, token) {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "Access token rejected");
            ApiError::Unauthorized("Invalid or expired token".into()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
