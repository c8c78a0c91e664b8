//! Local identity provider.
//!
//! Email/password accounts hashed with Argon2id, Google sign-in verified via
//! Google's tokeninfo endpoint, and single-use password reset tokens stored
//! as SHA-256 digests.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use domain::services::{AuthProvider, AuthProviderError, AuthenticatedUser};
use persistence::repositories::AuthAccountRepository;
use serde::Deserialize;
use shared::crypto::{generate_token_with_hash, sha256_hex};
use shared::password::{hash_password, verify_password};
use uuid::Uuid;

use crate::config::AuthConfig;

const PASSWORD_PROVIDER: &str = "password";
const GOOGLE_PROVIDER: &str = "google";

const INVALID_CREDENTIALS: &str =
    "The password is invalid or the user does not have a password.";
const EMAIL_IN_USE: &str = "The email address is already in use by another account.";
const INVALID_RESET_TOKEN: &str = "The password reset link is invalid or has expired.";

/// Subset of Google's tokeninfo response.
#[derive(Debug, Clone, Deserialize)]
struct GoogleTokenInfo {
    sub: String,
    aud: Option<String>,
    email: Option<String>,
    /// Google returns this as the string "true"/"false".
    email_verified: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GoogleAccount {
    subject: String,
    email: String,
}

fn check_google_claims(
    info: GoogleTokenInfo,
    client_id: &str,
) -> Result<GoogleAccount, AuthProviderError> {
    if info.aud.as_deref() != Some(client_id) {
        tracing::warn!(actual = ?info.aud, "Google token audience mismatch");
        return Err(AuthProviderError::InvalidToken(
            "Google ID token was not issued for this app".into(),
        ));
    }
    if info.email_verified.as_deref() != Some("true") {
        return Err(AuthProviderError::InvalidToken(
            "Google account email is not verified".into(),
        ));
    }
    let email = info
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AuthProviderError::InvalidToken("No email in Google token".into()))?;

    Ok(GoogleAccount {
        subject: info.sub,
        email,
    })
}

fn reset_link(base_url: &str, token: &str) -> String {
    format!("{}?token={}", base_url.trim_end_matches('/'), token)
}

fn storage_error(e: sqlx::Error) -> AuthProviderError {
    tracing::error!(error = %e, "Auth account storage error");
    AuthProviderError::Unavailable("Authentication service unavailable".into())
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

pub struct LocalAuthProvider {
    accounts: AuthAccountRepository,
    config: AuthConfig,
    http: reqwest::Client,
}

impl LocalAuthProvider {
    pub fn new(accounts: AuthAccountRepository, config: AuthConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        if config.google_client_id.is_empty() {
            tracing::warn!("Google client ID not configured; Google sign-in is disabled");
        }
        Ok(Self {
            accounts,
            config,
            http,
        })
    }

    async fn verify_google_token(&self, id_token: &str) -> Result<GoogleAccount, AuthProviderError> {
        if self.config.google_client_id.is_empty() {
            return Err(AuthProviderError::Unavailable(
                "Google Sign-In is not configured".into(),
            ));
        }

        let response = self
            .http
            .get(&self.config.google_tokeninfo_url)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Google tokeninfo request failed");
                AuthProviderError::Unavailable("Google Sign-In is unavailable".into())
            })?;

        if !response.status().is_success() {
            return Err(AuthProviderError::InvalidToken("Invalid Google ID token".into()));
        }

        let info: GoogleTokenInfo = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Unreadable Google tokeninfo response");
            AuthProviderError::Unavailable("Google Sign-In is unavailable".into())
        })?;

        check_google_claims(info, &self.config.google_client_id)
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthProviderError> {
        let account = self
            .accounts
            .find_by_email(email)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| AuthProviderError::InvalidCredentials(INVALID_CREDENTIALS.into()))?;

        let hash = account
            .password_hash
            .as_deref()
            .ok_or_else(|| AuthProviderError::InvalidCredentials(INVALID_CREDENTIALS.into()))?;

        match verify_password(password, hash) {
            Ok(true) => {}
            Ok(false) => {
                return Err(AuthProviderError::InvalidCredentials(
                    INVALID_CREDENTIALS.into(),
                ))
            }
            Err(e) => {
                tracing::error!(uid = %account.uid, error = %e, "Stored password hash unusable");
                return Err(AuthProviderError::InvalidCredentials(
                    INVALID_CREDENTIALS.into(),
                ));
            }
        }

        self.accounts
            .touch_sign_in(&account.uid)
            .await
            .map_err(storage_error)?;
        Ok(account.into())
    }

    async fn create_user_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthProviderError> {
        let hash = hash_password(password).map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            AuthProviderError::Unavailable("Account creation failed".into())
        })?;

        let uid = Uuid::new_v4().to_string();
        match self
            .accounts
            .create_account(&uid, email, Some(&hash), PASSWORD_PROVIDER, None)
            .await
        {
            Ok(account) => {
                tracing::info!(uid = %account.uid, "Email account created");
                Ok(account.into())
            }
            Err(e) if is_unique_violation(&e) => {
                Err(AuthProviderError::AccountExists(EMAIL_IN_USE.into()))
            }
            Err(e) => Err(storage_error(e)),
        }
    }

    /// Signs in the Google account, creating it on first use.
    async fn sign_in_with_google(
        &self,
        id_token: &str,
    ) -> Result<AuthenticatedUser, AuthProviderError> {
        let google = self.verify_google_token(id_token).await?;

        if let Some(account) = self
            .accounts
            .find_by_provider_subject(GOOGLE_PROVIDER, &google.subject)
            .await
            .map_err(storage_error)?
        {
            self.accounts
                .touch_sign_in(&account.uid)
                .await
                .map_err(storage_error)?;
            return Ok(account.into());
        }

        let uid = Uuid::new_v4().to_string();
        match self
            .accounts
            .create_account(&uid, &google.email, None, GOOGLE_PROVIDER, Some(&google.subject))
            .await
        {
            Ok(account) => {
                tracing::info!(uid = %account.uid, "Google account created");
                Ok(account.into())
            }
            Err(e) if is_unique_violation(&e) => Err(AuthProviderError::AccountExists(
                "An account already exists with the same email address but different sign-in credentials."
                    .into(),
            )),
            Err(e) => Err(storage_error(e)),
        }
    }

    /// Unknown addresses succeed silently so accounts cannot be enumerated.
    async fn send_password_reset_email(&self, email: &str) -> Result<(), AuthProviderError> {
        let Some(account) = self
            .accounts
            .find_by_email(email)
            .await
            .map_err(storage_error)?
        else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let (token, token_hash) = generate_token_with_hash();
        let expires_at = Utc::now() + Duration::minutes(self.config.reset_token_ttl_minutes);
        self.accounts
            .create_reset_token(&token_hash, &account.uid, expires_at)
            .await
            .map_err(storage_error)?;

        tracing::info!(uid = %account.uid, expires_at = %expires_at, "Password reset token issued");
        tracing::debug!(
            link = %reset_link(&self.config.reset_link_base_url, &token),
            "Password reset link"
        );
        Ok(())
    }

    async fn confirm_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), AuthProviderError> {
        let reset = self
            .accounts
            .consume_reset_token(&sha256_hex(token))
            .await
            .map_err(storage_error)?
            .ok_or_else(|| AuthProviderError::InvalidToken(INVALID_RESET_TOKEN.into()))?;

        let hash = hash_password(new_password).map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            AuthProviderError::Unavailable("Password reset failed".into())
        })?;
        self.accounts
            .update_password_hash(&reset.uid, &hash)
            .await
            .map_err(storage_error)?;

        tracing::info!(uid = %reset.uid, "Password reset completed");
        Ok(())
    }
}
