//! Database row mappings.

pub mod auth_account;
pub mod document;

pub use auth_account::{AuthAccountEntity, PasswordResetTokenEntity};
pub use document::DocumentEntity;
