//! Splash screen auth check.

use axum::{extract::State, Json};
use domain::models::TierHandle;
use domain::services::{Destination, SplashAuthState, SplashFlow};
use serde::Serialize;

use crate::app::AppState;
use crate::extractors::SessionUser;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub state: SplashAuthState,
    pub destination: Option<Destination>,
    /// Minimum time the client keeps the splash screen up.
    pub min_splash_duration_ms: u64,
}

/// GET /api/v1/session
///
/// The client owns the splash timer, so the duration half is marked complete
/// here and the destination follows from the auth check alone.
pub async fn get_session(
    State(state): State<AppState>,
    SessionUser(current_user): SessionUser,
) -> Json<SessionResponse> {
    let splash = SplashFlow::new(state.users.clone(), TierHandle::default());
    let auth_state = splash.initialize_app(current_user).await;
    splash.complete_splash_duration();

    tracing::debug!(state = ?auth_state, "Session checked");

    Json(SessionResponse {
        state: auth_state,
        destination: splash.destination(),
        min_splash_duration_ms: state.config.splash.min_duration_ms,
    })
}
