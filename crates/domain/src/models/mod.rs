//! Documents and request payloads for TruFurrs.

pub mod activity;
pub mod activity_goal;
pub mod alert;
pub mod alert_rule;
pub mod auth;
pub mod brand;
pub mod common;
pub mod constants;
pub mod device;
pub mod family;
pub mod family_invitation;
pub mod geofence;
pub mod health_data;
pub mod location_history;
pub mod pet;
pub mod pet_management_request;
pub mod sos_event;
pub mod tier;
pub mod user;
pub mod vet;

pub use activity::Activity;
pub use activity_goal::ActivityGoal;
pub use alert::Alert;
pub use alert_rule::AlertRule;
pub use common::{ApiResponse, Document, GeoPoint, LoadState};
pub use device::{Device, DeviceResponse, DeviceSettings, DeviceStatus, PairDeviceRequest};
pub use family::Family;
pub use family_invitation::FamilyInvitation;
pub use geofence::Geofence;
pub use health_data::HealthData;
pub use location_history::LocationHistory;
pub use pet::{DeviceInfo, Pet, PetType};
pub use pet_management_request::PetManagementRequest;
pub use sos_event::SosEvent;
pub use tier::{Tier, TierConfig, TierHandle};
pub use user::User;
pub use vet::Vet;
