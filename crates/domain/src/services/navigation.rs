//! Screen-to-screen routing decided by flow state.

use serde::Serialize;

use super::auth::AuthState;
use super::splash::SplashAuthState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Login,
    Main,
    PetRegistration,
}

impl Destination {
    pub fn after_splash(state: &SplashAuthState) -> Option<Self> {
        match state {
            SplashAuthState::Loading => None,
            SplashAuthState::Authenticated { .. } => Some(Destination::Main),
            SplashAuthState::NotAuthenticated | SplashAuthState::Error { .. } => {
                Some(Destination::Login)
            }
        }
    }

    pub fn after_login(state: &AuthState) -> Option<Self> {
        match state {
            AuthState::Success(_) | AuthState::ProfileCompleted => Some(Destination::Main),
            _ => None,
        }
    }

    /// New accounts continue to pet registration.
    pub fn after_sign_up(state: &AuthState) -> Option<Self> {
        match state {
            AuthState::Success(_) | AuthState::ProfileCompleted => {
                Some(Destination::PetRegistration)
            }
            _ => None,
        }
    }
}
