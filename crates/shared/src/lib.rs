//! Shared utilities for the TruFurrs backend.
//!
//! - Account field validation (email, name, phone, password)
//! - Coordinate and range validators used by request payloads
//! - Password hashing with Argon2id
//! - Session tokens (JWT) and opaque token hashing

pub mod crypto;
pub mod jwt;
pub mod password;
pub mod validation;
