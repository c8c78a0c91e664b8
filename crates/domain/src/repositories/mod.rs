//! Repository contracts for document access.
//!
//! Every operation is async and returns a [`RepositoryResult`]. The
//! `observe_*` operations hand back a `watch::Receiver` seeded with the
//! current value and updated on each change; the forwarding task stops once
//! every receiver has been dropped.

pub mod memory;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::watch;

use crate::models::{Device, DeviceInfo, DeviceStatus, Geofence, Pet, Tier, User};

pub use memory::{
    InMemoryDeviceRepository, InMemoryGeofenceRepository, InMemoryPetRepository,
    InMemoryUserRepository, MemoryCollection,
};

/// Errors raised by document stores.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Document already exists: {0}")]
    Conflict(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Backend(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// `collection/id`, the form used in change notifications and errors.
pub fn document_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, id)
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new profile and returns its id.
    async fn create_user(&self, user: User) -> RepositoryResult<String>;

    async fn get_user_by_id(&self, user_id: &str) -> RepositoryResult<Option<User>>;

    async fn update_user(&self, user: User) -> RepositoryResult<()>;

    async fn update_user_tier(&self, user_id: &str, tier: Tier) -> RepositoryResult<()>;

    /// Merges top-level fields into the stored profile.
    async fn complete_user_profile(
        &self,
        user_id: &str,
        updates: Map<String, Value>,
    ) -> RepositoryResult<()>;

    async fn observe_user(&self, user_id: &str) -> RepositoryResult<watch::Receiver<Option<User>>>;
}

#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn create_pet(&self, pet: Pet) -> RepositoryResult<String>;

    async fn get_pet_by_id(&self, pet_id: &str) -> RepositoryResult<Option<Pet>>;

    async fn get_pets_by_user_id(&self, user_id: &str) -> RepositoryResult<Vec<Pet>>;

    async fn update_pet(&self, pet: Pet) -> RepositoryResult<()>;

    async fn update_pet_device(&self, pet_id: &str, device: DeviceInfo) -> RepositoryResult<()>;

    async fn delete_pet(&self, pet_id: &str) -> RepositoryResult<()>;

    async fn observe_pets(&self, user_id: &str) -> RepositoryResult<watch::Receiver<Vec<Pet>>>;
}

#[async_trait]
pub trait DeviceRepository: Send + Sync {
    async fn create_device(&self, device: Device) -> RepositoryResult<String>;

    async fn get_device_by_id(&self, device_id: &str) -> RepositoryResult<Option<Device>>;

    async fn get_devices_by_user_id(&self, user_id: &str) -> RepositoryResult<Vec<Device>>;

    async fn update_device(&self, device: Device) -> RepositoryResult<()>;

    async fn update_device_status(
        &self,
        device_id: &str,
        status: DeviceStatus,
        battery_level: i32,
    ) -> RepositoryResult<()>;

    async fn delete_device(&self, device_id: &str) -> RepositoryResult<()>;

    async fn observe_device(
        &self,
        device_id: &str,
    ) -> RepositoryResult<watch::Receiver<Option<Device>>>;
}

#[async_trait]
pub trait GeofenceRepository: Send + Sync {
    async fn create_geofence(&self, geofence: Geofence) -> RepositoryResult<String>;

    async fn get_geofence_by_id(&self, geofence_id: &str) -> RepositoryResult<Option<Geofence>>;

    async fn get_geofences_by_user_id(&self, user_id: &str) -> RepositoryResult<Vec<Geofence>>;

    async fn delete_geofence(&self, geofence_id: &str) -> RepositoryResult<()>;
}
