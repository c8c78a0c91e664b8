//! Identity provider backed by PostgreSQL.

pub mod auth;

pub use auth::LocalAuthProvider;
