//! HTTP route handlers.

pub mod auth;
pub mod devices;
pub mod geofences;
pub mod health;
pub mod home;
pub mod pets;
pub mod session;
pub mod users;
