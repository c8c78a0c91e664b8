//! Startup auth check.
//!
//! The splash screen stays up until both the minimum display time has
//! elapsed and the auth check has finished, whichever comes last.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;

use super::auth::AuthProviderError;
use super::navigation::Destination;
use crate::models::TierHandle;
use crate::repositories::UserRepository;

/// Minimum time the splash screen is shown.
pub const DEFAULT_SPLASH_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SplashAuthState {
    Loading,
    Authenticated {
        #[serde(rename = "needsProfileCompletion")]
        needs_profile_completion: bool,
    },
    NotAuthenticated,
    Error {
        message: String,
    },
}

pub struct SplashFlow {
    users: Arc<dyn UserRepository>,
    tier: TierHandle,
    state: watch::Sender<SplashAuthState>,
    splash_completed: AtomicBool,
    auth_check_completed: AtomicBool,
}

impl SplashFlow {
    pub fn new(users: Arc<dyn UserRepository>, tier: TierHandle) -> Self {
        let (state, _) = watch::channel(SplashAuthState::Loading);
        Self {
            users,
            tier,
            state,
            splash_completed: AtomicBool::new(false),
            auth_check_completed: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SplashAuthState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> SplashAuthState {
        self.state.borrow().clone()
    }

    /// Runs the auth check for the session's signed-in account, if any.
    pub async fn initialize_app(
        &self,
        current_user: Result<Option<String>, AuthProviderError>,
    ) -> SplashAuthState {
        let users = Arc::clone(&self.users);
        let tier = self.tier.clone();
        let check = tokio::spawn(check_authentication_state(users, tier, current_user));

        let state = match check.await {
            Ok(state) => state,
            Err(e) => SplashAuthState::Error {
                message: format!("Failed to initialize app: {}", e),
            },
        };

        self.auth_check_completed.store(true, Ordering::SeqCst);
        self.state.send_replace(state.clone());
        state
    }

    /// Marks the minimum splash time as elapsed; returns whether navigation may proceed.
    pub fn complete_splash_duration(&self) -> bool {
        self.splash_completed.store(true, Ordering::SeqCst);
        self.is_ready_to_navigate()
    }

    pub fn is_ready_to_navigate(&self) -> bool {
        self.splash_completed.load(Ordering::SeqCst)
            && self.auth_check_completed.load(Ordering::SeqCst)
    }

    /// Where to go once ready; `None` while either half is still pending.
    pub fn destination(&self) -> Option<Destination> {
        if !self.is_ready_to_navigate() {
            return None;
        }
        Destination::after_splash(&self.current())
    }

    /// Runs the auth check alongside the minimum display timer.
    pub async fn run(
        &self,
        current_user: Result<Option<String>, AuthProviderError>,
        min_duration: Duration,
    ) -> SplashAuthState {
        let (state, _) = tokio::join!(self.initialize_app(current_user), async {
            tokio::time::sleep(min_duration).await;
            self.complete_splash_duration()
        });
        state
    }
}

async fn check_authentication_state(
    users: Arc<dyn UserRepository>,
    tier: TierHandle,
    current_user: Result<Option<String>, AuthProviderError>,
) -> SplashAuthState {
    let user_id = match current_user {
        Ok(Some(user_id)) => user_id,
        Ok(None) => return SplashAuthState::NotAuthenticated,
        Err(e) => {
            return SplashAuthState::Error {
                message: format!("Authentication check failed: {}", e),
            }
        }
    };

    match users.get_user_by_id(&user_id).await {
        Ok(Some(user)) => {
            tier.set(user.tier);
            SplashAuthState::Authenticated {
                needs_profile_completion: user.profile_incomplete,
            }
        }
        // Signed in but never got a profile document.
        Ok(None) => SplashAuthState::Authenticated {
            needs_profile_completion: true,
        },
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "Splash profile load failed");
            SplashAuthState::Error {
                message: format!("Failed to load user profile: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Tier, User};
    use crate::repositories::InMemoryUserRepository;

    async fn flow_with(user: Option<User>) -> SplashFlow {
        let users = Arc::new(InMemoryUserRepository::new());
        if let Some(user) = user {
            users.create_user(user).await.unwrap();
        }
        SplashFlow::new(users, TierHandle::default())
    }

    #[tokio::test]
    async fn test_no_user_is_not_authenticated() {
        let flow = flow_with(None).await;
        assert_eq!(
            flow.initialize_app(Ok(None)).await,
            SplashAuthState::NotAuthenticated
        );
    }

    #[tokio::test]
    async fn test_missing_profile_needs_completion() {
        let flow = flow_with(None).await;
        assert_eq!(
            flow.initialize_app(Ok(Some("uid-1".into()))).await,
            SplashAuthState::Authenticated {
                needs_profile_completion: true
            }
        );
    }

    #[tokio::test]
    async fn test_complete_profile_loads_tier() {
        let mut user = User::new_profile("uid-1", "Jane Doe", "jane@example.com", None, None);
        user.profile_incomplete = false;
        user.tier = Tier::Active;
        let flow = flow_with(Some(user)).await;

        let state = flow.initialize_app(Ok(Some("uid-1".into()))).await;
        assert_eq!(
            state,
            SplashAuthState::Authenticated {
                needs_profile_completion: false
            }
        );
        assert_eq!(flow.tier.current(), Tier::Active);
    }

    #[tokio::test]
    async fn test_provider_error() {
        let flow = flow_with(None).await;
        let state = flow
            .initialize_app(Err(AuthProviderError::InvalidToken("expired".into())))
            .await;
        assert_eq!(
            state,
            SplashAuthState::Error {
                message: "Authentication check failed: expired".into()
            }
        );
    }

    #[tokio::test]
    async fn test_ready_only_after_both_halves() {
        let flow = flow_with(None).await;
        assert!(!flow.is_ready_to_navigate());

        assert!(!flow.complete_splash_duration());
        assert_eq!(flow.destination(), None);

        flow.initialize_app(Ok(None)).await;
        assert!(flow.is_ready_to_navigate());
        assert_eq!(flow.destination(), Some(Destination::Login));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_waits_for_min_duration() {
        let flow = flow_with(None).await;
        let started = tokio::time::Instant::now();
        flow.run(Ok(None), DEFAULT_SPLASH_DURATION).await;
        assert!(started.elapsed() >= DEFAULT_SPLASH_DURATION);
        assert!(flow.is_ready_to_navigate());
    }

    #[test]
    fn test_state_serialization() {
        let json = serde_json::to_value(SplashAuthState::Authenticated {
            needs_profile_completion: true,
        })
        .unwrap();
        assert_eq!(json["status"], "authenticated");
        assert_eq!(json["needsProfileCompletion"], true);

        let json = serde_json::to_value(SplashAuthState::NotAuthenticated).unwrap();
        assert_eq!(json["status"], "notAuthenticated");
    }
}
