//! Authentication flow.
//!
//! [`AuthFlow`] drives sign-in, sign-up, profile completion and tier changes
//! against an [`AuthProvider`] and the user repository, publishing each step
//! as an [`AuthState`] on a watch channel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

use crate::models::{Tier, TierHandle, User};
use crate::repositories::UserRepository;

/// Account returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uid: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthProviderError {
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("{0}")]
    AccountExists(String),

    #[error("{0}")]
    InvalidToken(String),

    /// The provider reported success without an account.
    #[error("no user returned")]
    NoUser,

    #[error("{0}")]
    Unavailable(String),
}

impl AuthProviderError {
    /// Message shown to the user, or `fallback` when the provider gave none.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            AuthProviderError::NoUser => fallback.to_string(),
            other => non_empty_or(other.to_string(), fallback),
        }
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// Identity provider for email/password and Google accounts.
#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthProviderError>;

    async fn create_user_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthProviderError>;

    async fn sign_in_with_google(
        &self,
        id_token: &str,
    ) -> Result<AuthenticatedUser, AuthProviderError>;

    async fn send_password_reset_email(&self, email: &str) -> Result<(), AuthProviderError>;

    async fn confirm_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), AuthProviderError>;
}

/// Published state of the auth flow.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Idle,
    Loading,
    Success(User),
    Error(String),
    ProfileCompleted,
    TierUpdated(Tier),
}

pub struct AuthFlow {
    users: Arc<dyn UserRepository>,
    auth: Arc<dyn AuthProvider>,
    tier: TierHandle,
    state: watch::Sender<AuthState>,
}

impl AuthFlow {
    pub fn new(users: Arc<dyn UserRepository>, auth: Arc<dyn AuthProvider>, tier: TierHandle) -> Self {
        let (state, _) = watch::channel(AuthState::Idle);
        Self {
            users,
            auth,
            tier,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn tier(&self) -> &TierHandle {
        &self.tier
    }

    fn publish(&self, state: AuthState) -> AuthState {
        self.state.send_replace(state.clone());
        state
    }

    pub async fn sign_in_with_email(&self, email: &str, password: &str) -> AuthState {
        self.publish(AuthState::Loading);

        match self.auth.sign_in_with_email(email, password).await {
            Ok(account) => self.load_user_profile(&account.uid).await,
            Err(AuthProviderError::NoUser) => {
                self.publish(AuthState::Error("Authentication failed".into()))
            }
            Err(e) => {
                tracing::info!(error = %e, "Email sign-in rejected");
                self.publish(AuthState::Error(e.message_or("Sign in failed")))
            }
        }
    }

    pub async fn sign_up_with_email(
        &self,
        full_name: &str,
        email: &str,
        phone_number: Option<String>,
        password: &str,
    ) -> AuthState {
        self.publish(AuthState::Loading);

        match self.auth.create_user_with_email(email, password).await {
            Ok(account) => {
                self.create_user_profile(&account.uid, full_name, email, phone_number, None)
                    .await
            }
            Err(e) => {
                tracing::info!(error = %e, "Email sign-up rejected");
                self.publish(AuthState::Error(e.message_or("Account creation failed")))
            }
        }
    }

    pub async fn sign_in_with_google(&self, id_token: &str) -> AuthState {
        self.publish(AuthState::Loading);

        match self.auth.sign_in_with_google(id_token).await {
            Ok(account) => self.load_user_profile(&account.uid).await,
            Err(e) => {
                tracing::info!(error = %e, "Google sign-in rejected");
                self.publish(AuthState::Error(e.message_or("Google Sign-In failed")))
            }
        }
    }

    pub async fn sign_up_with_google(
        &self,
        id_token: &str,
        display_name: &str,
        email: &str,
        photo_url: Option<String>,
    ) -> AuthState {
        self.publish(AuthState::Loading);

        match self.auth.sign_in_with_google(id_token).await {
            Ok(account) => {
                self.create_user_profile(
                    &account.uid,
                    display_name,
                    email,
                    account.phone_number,
                    photo_url,
                )
                .await
            }
            Err(e) => {
                tracing::info!(error = %e, "Google sign-up rejected");
                self.publish(AuthState::Error(e.message_or("Google Sign-Up failed")))
            }
        }
    }

    /// Sends a reset link. Success leaves the published state untouched.
    pub async fn reset_password(&self, email: &str) -> AuthState {
        match self.auth.send_password_reset_email(email).await {
            Ok(()) => self.current(),
            Err(e) => self.publish(AuthState::Error(e.message_or("Password reset failed"))),
        }
    }

    pub async fn confirm_password_reset(&self, token: &str, new_password: &str) -> AuthState {
        match self.auth.confirm_password_reset(token, new_password).await {
            Ok(()) => self.current(),
            Err(e) => self.publish(AuthState::Error(e.message_or("Password reset failed"))),
        }
    }

    async fn load_user_profile(&self, user_id: &str) -> AuthState {
        match self.users.get_user_by_id(user_id).await {
            Ok(Some(user)) => {
                self.tier.set(user.tier);
                tracing::info!(user_id = %user_id, tier = %user.tier, "User signed in");
                self.publish(AuthState::Success(user))
            }
            Ok(None) => {
                tracing::warn!(user_id = %user_id, "Authenticated account has no profile");
                self.publish(AuthState::Error("User profile not found".into()))
            }
            Err(e) => self.publish(AuthState::Error(non_empty_or(
                e.to_string(),
                "Failed to load profile",
            ))),
        }
    }

    async fn create_user_profile(
        &self,
        uid: &str,
        display_name: &str,
        email: &str,
        phone_number: Option<String>,
        photo_url: Option<String>,
    ) -> AuthState {
        let user = User::new_profile(uid, display_name, email, phone_number, photo_url);

        match self.users.create_user(user.clone()).await {
            Ok(_) => {
                tracing::info!(user_id = %uid, "User profile created");
                self.publish(AuthState::Success(user))
            }
            Err(e) => self.publish(AuthState::Error(non_empty_or(
                e.to_string(),
                "Failed to create profile",
            ))),
        }
    }

    /// Merges `additional` into the profile and clears `profileIncomplete`.
    pub async fn complete_profile(&self, user_id: &str, additional: Map<String, Value>) -> AuthState {
        self.publish(AuthState::Loading);

        let mut updates = additional;
        updates.insert("profileIncomplete".to_string(), Value::Bool(false));

        match self.users.complete_user_profile(user_id, updates).await {
            Ok(()) => self.publish(AuthState::ProfileCompleted),
            Err(e) => self.publish(AuthState::Error(non_empty_or(
                e.to_string(),
                "Profile completion failed",
            ))),
        }
    }

    /// Moves the session to the paired device's tier, then persists it.
    pub async fn update_user_tier_after_pairing(&self, user_id: &str, device_type: &str) -> AuthState {
        let tier = self.tier.update_from_device(device_type);

        match self.users.update_user_tier(user_id, tier).await {
            Ok(()) => {
                tracing::info!(user_id = %user_id, tier = %tier, "User tier updated");
                self.publish(AuthState::TierUpdated(tier))
            }
            Err(e) => self.publish(AuthState::Error(non_empty_or(
                e.to_string(),
                "Tier update failed",
            ))),
        }
    }
}

struct MockAccount {
    uid: String,
    password: String,
    phone_number: Option<String>,
}

/// In-process provider for development and tests.
///
/// Google ID tokens are accepted as `google:<email>`; reset tokens are the
/// address itself.
#[derive(Default)]
pub struct MockAuthProvider {
    accounts: Mutex<HashMap<String, MockAccount>>,
    simulate_failure: bool,
}

impl MockAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider whose every call fails as if the backend were down.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Registers an account up front and returns its uid.
    pub fn with_account(&self, email: &str, password: &str) -> String {
        let uid = Uuid::new_v4().to_string();
        if let Ok(mut accounts) = self.accounts.lock() {
            accounts.insert(
                email.to_lowercase(),
                MockAccount {
                    uid: uid.clone(),
                    password: password.to_string(),
                    phone_number: None,
                },
            );
        }
        uid
    }

    fn accounts(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, MockAccount>>, AuthProviderError> {
        if self.simulate_failure {
            return Err(AuthProviderError::Unavailable(
                "Simulated provider failure".into(),
            ));
        }
        self.accounts
            .lock()
            .map_err(|_| AuthProviderError::Unavailable("Provider state poisoned".into()))
    }
}

#[async_trait::async_trait]
impl AuthProvider for MockAuthProvider {
    async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthProviderError> {
        let accounts = self.accounts()?;
        match accounts.get(&email.to_lowercase()) {
            Some(account) if account.password == password => Ok(AuthenticatedUser {
                uid: account.uid.clone(),
                email: Some(email.to_string()),
                phone_number: account.phone_number.clone(),
            }),
            _ => Err(AuthProviderError::InvalidCredentials(
                "Invalid email or password".into(),
            )),
        }
    }

    async fn create_user_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthProviderError> {
        let mut accounts = self.accounts()?;
        let key = email.to_lowercase();
        if accounts.contains_key(&key) {
            return Err(AuthProviderError::AccountExists(
                "The email address is already in use by another account.".into(),
            ));
        }
        let uid = Uuid::new_v4().to_string();
        accounts.insert(
            key,
            MockAccount {
                uid: uid.clone(),
                password: password.to_string(),
                phone_number: None,
            },
        );
        Ok(AuthenticatedUser {
            uid,
            email: Some(email.to_string()),
            phone_number: None,
        })
    }

    async fn sign_in_with_google(
        &self,
        id_token: &str,
    ) -> Result<AuthenticatedUser, AuthProviderError> {
        let email = id_token
            .strip_prefix("google:")
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AuthProviderError::InvalidToken("Invalid Google ID token".into()))?;

        let mut accounts = self.accounts()?;
        let account = accounts
            .entry(email.to_lowercase())
            .or_insert_with(|| MockAccount {
                uid: Uuid::new_v4().to_string(),
                password: String::new(),
                phone_number: None,
            });
        Ok(AuthenticatedUser {
            uid: account.uid.clone(),
            email: Some(email.to_string()),
            phone_number: account.phone_number.clone(),
        })
    }

    async fn send_password_reset_email(&self, email: &str) -> Result<(), AuthProviderError> {
        let accounts = self.accounts()?;
        if !accounts.contains_key(&email.to_lowercase()) {
            return Err(AuthProviderError::InvalidCredentials(
                "There is no user record corresponding to this identifier.".into(),
            ));
        }
        tracing::info!(email = %email, "Mock: Would send password reset email");
        Ok(())
    }

    async fn confirm_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), AuthProviderError> {
        let mut accounts = self.accounts()?;
        let account = accounts
            .get_mut(&token.to_lowercase())
            .ok_or_else(|| AuthProviderError::InvalidToken("Invalid or expired reset token".into()))?;
        account.password = new_password.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{InMemoryUserRepository, RepositoryError, RepositoryResult};
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;

    fn flow(provider: MockAuthProvider) -> (AuthFlow, Arc<InMemoryUserRepository>) {
        let users = Arc::new(InMemoryUserRepository::new());
        let flow = AuthFlow::new(users.clone(), Arc::new(provider), TierHandle::default());
        (flow, users)
    }

    /// Repository whose reads and writes always fail.
    struct BrokenUsers;

    #[async_trait::async_trait]
    impl UserRepository for BrokenUsers {
        async fn create_user(&self, _user: User) -> RepositoryResult<String> {
            Err(RepositoryError::Backend("write failed".into()))
        }
        async fn get_user_by_id(&self, _user_id: &str) -> RepositoryResult<Option<User>> {
            Err(RepositoryError::Backend("read failed".into()))
        }
        async fn update_user(&self, _user: User) -> RepositoryResult<()> {
            Err(RepositoryError::Backend("write failed".into()))
        }
        async fn update_user_tier(&self, _user_id: &str, _tier: Tier) -> RepositoryResult<()> {
            Err(RepositoryError::Backend("write failed".into()))
        }
        async fn complete_user_profile(
            &self,
            _user_id: &str,
            _updates: Map<String, Value>,
        ) -> RepositoryResult<()> {
            Err(RepositoryError::Backend("write failed".into()))
        }
        async fn observe_user(
            &self,
            _user_id: &str,
        ) -> RepositoryResult<watch::Receiver<Option<User>>> {
            Err(RepositoryError::Backend("read failed".into()))
        }
    }

    #[tokio::test]
    async fn test_sign_up_creates_incomplete_tag_profile() {
        let (flow, users) = flow(MockAuthProvider::new());
        let email: String = SafeEmail().fake();

        let state = flow
            .sign_up_with_email("Jane Doe", &email, Some("+15551234567".into()), "secret123")
            .await;

        let AuthState::Success(user) = state else {
            panic!("expected success, got {:?}", state);
        };
        assert_eq!(user.tier, Tier::Tag);
        assert!(user.profile_incomplete);
        assert_eq!(user.email, email);

        let stored = users.get_user_by_id(&user.user_id).await.unwrap().unwrap();
        assert_eq!(stored.display_name, "Jane Doe");
        assert_eq!(stored.phone_number.as_deref(), Some("+15551234567"));
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email_reports_provider_message() {
        let provider = MockAuthProvider::new();
        provider.with_account("jane@example.com", "secret123");
        let (flow, _) = flow(provider);

        let state = flow
            .sign_up_with_email("Jane Doe", "jane@example.com", None, "secret123")
            .await;
        assert_eq!(
            state,
            AuthState::Error("The email address is already in use by another account.".into())
        );
    }

    #[tokio::test]
    async fn test_sign_in_publishes_loading_then_success() {
        let (flow, _) = flow(MockAuthProvider::new());
        flow.sign_up_with_email("Jane Doe", "jane@example.com", None, "secret123")
            .await;
        let mut rx = flow.subscribe();
        rx.mark_unchanged();

        let state = flow.sign_in_with_email("jane@example.com", "secret123").await;
        assert!(matches!(state, AuthState::Success(ref u) if u.email == "jane@example.com"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow(), state);
    }

    #[tokio::test]
    async fn test_sign_in_sets_session_tier() {
        let (flow, users) = flow(MockAuthProvider::new());
        let AuthState::Success(user) = flow
            .sign_up_with_email("Jane Doe", "jane@example.com", None, "secret123")
            .await
        else {
            panic!("sign-up failed");
        };
        users.update_user_tier(&user.user_id, Tier::Sense).await.unwrap();

        flow.sign_in_with_email("jane@example.com", "secret123").await;
        assert_eq!(flow.tier().current(), Tier::Sense);
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password() {
        let provider = MockAuthProvider::new();
        provider.with_account("jane@example.com", "secret123");
        let (flow, _) = flow(provider);

        let state = flow.sign_in_with_email("jane@example.com", "wrong99").await;
        assert_eq!(state, AuthState::Error("Invalid email or password".into()));
    }

    #[tokio::test]
    async fn test_sign_in_without_profile() {
        let provider = MockAuthProvider::new();
        provider.with_account("jane@example.com", "secret123");
        let (flow, _) = flow(provider);

        let state = flow.sign_in_with_email("jane@example.com", "secret123").await;
        assert_eq!(state, AuthState::Error("User profile not found".into()));
    }

    #[tokio::test]
    async fn test_provider_failure_passes_message_through() {
        let (flow, _) = flow(MockAuthProvider::failing());
        let state = flow.sign_in_with_email("jane@example.com", "secret123").await;
        assert_eq!(state, AuthState::Error("Simulated provider failure".into()));
    }

    #[tokio::test]
    async fn test_repository_failure_on_profile_load() {
        let provider = MockAuthProvider::new();
        provider.with_account("jane@example.com", "secret123");
        let flow = AuthFlow::new(Arc::new(BrokenUsers), Arc::new(provider), TierHandle::default());

        let state = flow.sign_in_with_email("jane@example.com", "secret123").await;
        assert_eq!(state, AuthState::Error("Storage error: read failed".into()));
    }

    #[tokio::test]
    async fn test_google_sign_up_then_sign_in() {
        let (flow, _) = flow(MockAuthProvider::new());
        let state = flow
            .sign_up_with_google("google:sam@example.com", "Sam Lee", "sam@example.com", None)
            .await;
        assert!(matches!(state, AuthState::Success(_)));

        let state = flow.sign_in_with_google("google:sam@example.com").await;
        assert!(matches!(state, AuthState::Success(ref u) if u.display_name == "Sam Lee"));
    }

    #[tokio::test]
    async fn test_google_bad_token() {
        let (flow, _) = flow(MockAuthProvider::new());
        let state = flow.sign_in_with_google("garbage").await;
        assert_eq!(state, AuthState::Error("Invalid Google ID token".into()));
    }

    #[tokio::test]
    async fn test_reset_password_success_keeps_state() {
        let provider = MockAuthProvider::new();
        provider.with_account("jane@example.com", "secret123");
        let (flow, _) = flow(provider);

        assert_eq!(flow.reset_password("jane@example.com").await, AuthState::Idle);
        assert!(matches!(
            flow.reset_password("nobody@example.com").await,
            AuthState::Error(_)
        ));
    }

    #[tokio::test]
    async fn test_complete_profile_clears_flag() {
        let (flow, users) = flow(MockAuthProvider::new());
        let AuthState::Success(user) = flow
            .sign_up_with_email("Jane Doe", "jane@example.com", None, "secret123")
            .await
        else {
            panic!("sign-up failed");
        };

        let mut extra = Map::new();
        extra.insert("displayName".into(), Value::from("Jane Q Doe"));
        let state = flow.complete_profile(&user.user_id, extra).await;
        assert_eq!(state, AuthState::ProfileCompleted);

        let stored = users.get_user_by_id(&user.user_id).await.unwrap().unwrap();
        assert!(!stored.profile_incomplete);
        assert_eq!(stored.display_name, "Jane Q Doe");
    }

    #[tokio::test]
    async fn test_complete_profile_unknown_user() {
        let (flow, _) = flow(MockAuthProvider::new());
        let state = flow.complete_profile("ghost", Map::new()).await;
        assert_eq!(state, AuthState::Error("Document not found: users/ghost".into()));
    }

    #[tokio::test]
    async fn test_tier_update_after_pairing() {
        let (flow, users) = flow(MockAuthProvider::new());
        let AuthState::Success(user) = flow
            .sign_up_with_email("Jane Doe", "jane@example.com", None, "secret123")
            .await
        else {
            panic!("sign-up failed");
        };

        let state = flow
            .update_user_tier_after_pairing(&user.user_id, " active ")
            .await;
        assert_eq!(state, AuthState::TierUpdated(Tier::Active));
        assert_eq!(flow.tier().current(), Tier::Active);

        let stored = users.get_user_by_id(&user.user_id).await.unwrap().unwrap();
        assert_eq!(stored.tier, Tier::Active);
    }

    #[tokio::test]
    async fn test_tier_update_failure_still_moves_session_tier() {
        let flow = AuthFlow::new(
            Arc::new(BrokenUsers),
            Arc::new(MockAuthProvider::new()),
            TierHandle::default(),
        );
        let state = flow.update_user_tier_after_pairing("u1", "SENSE").await;
        assert!(matches!(state, AuthState::Error(_)));
        assert_eq!(flow.tier().current(), Tier::Sense);
    }

    #[test]
    fn test_message_fallback() {
        assert_eq!(
            AuthProviderError::NoUser.message_or("Authentication failed"),
            "Authentication failed"
        );
        assert_eq!(
            AuthProviderError::Unavailable(String::new()).message_or("Sign in failed"),
            "Sign in failed"
        );
    }
}
