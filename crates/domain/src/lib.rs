//! Domain layer for TruFurrs.
//!
//! This crate contains:
//! - Documents (User, Pet, Device, Geofence and the tracker-produced records)
//! - Tier configuration and the shared tier handle
//! - Repository traits with in-memory implementations
//! - Auth, splash, navigation and pairing flows

pub mod models;
pub mod repositories;
pub mod services;
