//! Sign-in account row mappings.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the auth_accounts table.
#[derive(Debug, Clone, FromRow)]
pub struct AuthAccountEntity {
    pub uid: String,
    pub email: String,
    pub password_hash: Option<String>,
    /// `password` or `google`
    pub provider: String,
    pub provider_subject: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

impl From<AuthAccountEntity> for domain::services::AuthenticatedUser {
    fn from(entity: AuthAccountEntity) -> Self {
        Self {
            uid: entity.uid,
            email: Some(entity.email),
            phone_number: entity.phone_number,
        }
    }
}

/// Database row mapping for the password_reset_tokens table.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetTokenEntity {
    pub token_hash: String,
    pub uid: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
