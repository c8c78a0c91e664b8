//! Sign-in accounts and password reset tokens.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::entities::{AuthAccountEntity, PasswordResetTokenEntity};
use crate::metrics::QueryTimer;

/// Repository for the accounts behind the local auth provider.
#[derive(Clone)]
pub struct AuthAccountRepository {
    pool: PgPool,
}

impl AuthAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an account by (lowercased) email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<AuthAccountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_auth_account_by_email");
        let result = sqlx::query_as::<_, AuthAccountEntity>(
            r#"
            SELECT uid, email, password_hash, provider, provider_subject, phone_number,
                   created_at, last_sign_in_at
            FROM auth_accounts
            WHERE email = $1
            "#,
        )
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a federated account by provider and the provider's subject id.
    pub async fn find_by_provider_subject(
        &self,
        provider: &str,
        subject: &str,
    ) -> Result<Option<AuthAccountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_auth_account_by_subject");
        let result = sqlx::query_as::<_, AuthAccountEntity>(
            r#"
            SELECT uid, email, password_hash, provider, provider_subject, phone_number,
                   created_at, last_sign_in_at
            FROM auth_accounts
            WHERE provider = $1 AND provider_subject = $2
            "#,
        )
        .bind(provider)
        .bind(subject)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create an account. A duplicate email surfaces as a unique violation.
    pub async fn create_account(
        &self,
        uid: &str,
        email: &str,
        password_hash: Option<&str>,
        provider: &str,
        provider_subject: Option<&str>,
    ) -> Result<AuthAccountEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_auth_account");
        let result = sqlx::query_as::<_, AuthAccountEntity>(
            r#"
            INSERT INTO auth_accounts (uid, email, password_hash, provider, provider_subject)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING uid, email, password_hash, provider, provider_subject, phone_number,
                      created_at, last_sign_in_at
            "#,
        )
        .bind(uid)
        .bind(email.to_lowercase())
        .bind(password_hash)
        .bind(provider)
        .bind(provider_subject)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn touch_sign_in(&self, uid: &str) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("touch_auth_account_sign_in");
        sqlx::query("UPDATE auth_accounts SET last_sign_in_at = NOW() WHERE uid = $1")
            .bind(uid)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(())
    }

    pub async fn update_password_hash(&self, uid: &str, password_hash: &str) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("update_auth_account_password");
        sqlx::query("UPDATE auth_accounts SET password_hash = $2 WHERE uid = $1")
            .bind(uid)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(())
    }

    pub async fn create_reset_token(
        &self,
        token_hash: &str,
        uid: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("create_password_reset_token");
        sqlx::query(
            r#"
            INSERT INTO password_reset_tokens (token_hash, uid, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(token_hash)
        .bind(uid)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(())
    }

    /// Marks an unused, unexpired token as used and returns it.
    pub async fn consume_reset_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<PasswordResetTokenEntity>, sqlx::Error> {
        let timer = QueryTimer::new("consume_password_reset_token");
        let result = sqlx::query_as::<_, PasswordResetTokenEntity>(
            r#"
            UPDATE password_reset_tokens
            SET used_at = NOW()
            WHERE token_hash = $1 AND used_at IS NULL AND expires_at > NOW()
            RETURNING token_hash, uid, expires_at, used_at, created_at
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
