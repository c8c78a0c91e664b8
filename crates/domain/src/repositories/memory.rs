//! In-memory document store backing tests and local development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::{broadcast, watch, RwLock};
use uuid::Uuid;

use super::{
    document_path, DeviceRepository, GeofenceRepository, PetRepository, RepositoryError,
    RepositoryResult, UserRepository,
};
use crate::models::{Device, DeviceInfo, DeviceStatus, Document, Geofence, Pet, Tier, User};

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// One collection of documents keyed by id.
///
/// Writers broadcast the changed id; observers recompute their projection
/// on every change.
pub struct MemoryCollection<T: Document> {
    docs: RwLock<HashMap<String, T>>,
    changes: broadcast::Sender<String>,
}

impl<T: Document> Default for MemoryCollection<T> {
    fn default() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            docs: RwLock::new(HashMap::new()),
            changes,
        }
    }
}

impl<T: Document> MemoryCollection<T> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn notify(&self, id: &str) {
        // No receivers is fine.
        let _ = self.changes.send(id.to_string());
    }

    pub async fn insert(&self, mut doc: T) -> RepositoryResult<String> {
        if doc.document_id().is_empty() {
            doc.set_document_id(Uuid::new_v4().to_string());
        }
        let id = doc.document_id().to_string();
        doc.stamp(Utc::now(), true);

        let mut docs = self.docs.write().await;
        if docs.contains_key(&id) {
            return Err(RepositoryError::Conflict(document_path(T::COLLECTION, &id)));
        }
        docs.insert(id.clone(), doc);
        drop(docs);

        self.notify(&id);
        Ok(id)
    }

    pub async fn get(&self, id: &str) -> Option<T> {
        self.docs.read().await.get(id).cloned()
    }

    pub async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.docs
            .read()
            .await
            .values()
            .filter(|doc| predicate(doc))
            .cloned()
            .collect()
    }

    pub async fn replace(&self, mut doc: T) -> RepositoryResult<()> {
        let id = doc.document_id().to_string();
        let mut docs = self.docs.write().await;
        if !docs.contains_key(&id) {
            return Err(RepositoryError::NotFound(document_path(T::COLLECTION, &id)));
        }
        doc.stamp(Utc::now(), false);
        docs.insert(id.clone(), doc);
        drop(docs);

        self.notify(&id);
        Ok(())
    }

    /// Overwrites the given top-level fields, leaving the rest untouched.
    pub async fn merge(&self, id: &str, patch: Map<String, Value>) -> RepositoryResult<()> {
        let mut docs = self.docs.write().await;
        let current = docs
            .get(id)
            .ok_or_else(|| RepositoryError::NotFound(document_path(T::COLLECTION, id)))?;

        let mut value = serde_json::to_value(current)?;
        if let Value::Object(fields) = &mut value {
            fields.extend(patch);
        }
        let mut merged: T = serde_json::from_value(value)?;
        merged.set_document_id(id.to_string());
        merged.stamp(Utc::now(), false);
        docs.insert(id.to_string(), merged);
        drop(docs);

        self.notify(id);
        Ok(())
    }

    pub async fn remove(&self, id: &str) -> RepositoryResult<()> {
        let removed = self.docs.write().await.remove(id);
        if removed.is_none() {
            return Err(RepositoryError::NotFound(document_path(T::COLLECTION, id)));
        }
        self.notify(id);
        Ok(())
    }

    /// Publishes `project` over the collection, recomputed after each write.
    pub async fn observe<V, F>(self: &Arc<Self>, project: F) -> watch::Receiver<V>
    where
        V: Send + Sync + 'static,
        F: Fn(&HashMap<String, T>) -> V + Send + Sync + 'static,
    {
        let mut changes = self.changes.subscribe();
        let (tx, rx) = watch::channel(project(&*self.docs.read().await));
        let collection = Arc::clone(self);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tx.closed() => break,
                    changed = changes.recv() => match changed {
                        Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {
                            let value = project(&*collection.docs.read().await);
                            tx.send_replace(value);
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
            tracing::debug!(collection = T::COLLECTION, "Observer closed");
        });

        rx
    }
}

fn patch(field: &str, value: Value) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(field.to_string(), value);
    map
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<MemoryCollection<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: User) -> RepositoryResult<String> {
        self.users.insert(user).await
    }

    async fn get_user_by_id(&self, user_id: &str) -> RepositoryResult<Option<User>> {
        Ok(self.users.get(user_id).await)
    }

    async fn update_user(&self, user: User) -> RepositoryResult<()> {
        self.users.replace(user).await
    }

    async fn update_user_tier(&self, user_id: &str, tier: Tier) -> RepositoryResult<()> {
        self.users
            .merge(user_id, patch("tier", serde_json::to_value(tier)?))
            .await
    }

    async fn complete_user_profile(
        &self,
        user_id: &str,
        updates: Map<String, Value>,
    ) -> RepositoryResult<()> {
        self.users.merge(user_id, updates).await
    }

    async fn observe_user(&self, user_id: &str) -> RepositoryResult<watch::Receiver<Option<User>>> {
        let id = user_id.to_string();
        Ok(self.users.observe(move |docs| docs.get(&id).cloned()).await)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryPetRepository {
    pets: Arc<MemoryCollection<Pet>>,
}

impl InMemoryPetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn pets_of(docs: &HashMap<String, Pet>, user_id: &str) -> Vec<Pet> {
    let mut pets: Vec<Pet> = docs
        .values()
        .filter(|pet| pet.user_id == user_id)
        .cloned()
        .collect();
    pets.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.pet_id.cmp(&b.pet_id)));
    pets
}

#[async_trait]
impl PetRepository for InMemoryPetRepository {
    async fn create_pet(&self, pet: Pet) -> RepositoryResult<String> {
        self.pets.insert(pet).await
    }

    async fn get_pet_by_id(&self, pet_id: &str) -> RepositoryResult<Option<Pet>> {
        Ok(self.pets.get(pet_id).await)
    }

    async fn get_pets_by_user_id(&self, user_id: &str) -> RepositoryResult<Vec<Pet>> {
        Ok(pets_of(&*self.pets.docs.read().await, user_id))
    }

    async fn update_pet(&self, pet: Pet) -> RepositoryResult<()> {
        self.pets.replace(pet).await
    }

    async fn update_pet_device(&self, pet_id: &str, device: DeviceInfo) -> RepositoryResult<()> {
        self.pets
            .merge(pet_id, patch("currentDevice", serde_json::to_value(device)?))
            .await
    }

    async fn delete_pet(&self, pet_id: &str) -> RepositoryResult<()> {
        self.pets.remove(pet_id).await
    }

    async fn observe_pets(&self, user_id: &str) -> RepositoryResult<watch::Receiver<Vec<Pet>>> {
        let id = user_id.to_string();
        Ok(self.pets.observe(move |docs| pets_of(docs, &id)).await)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryDeviceRepository {
    devices: Arc<MemoryCollection<Device>>,
}

impl InMemoryDeviceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeviceRepository for InMemoryDeviceRepository {
    async fn create_device(&self, device: Device) -> RepositoryResult<String> {
        self.devices.insert(device).await
    }

    async fn get_device_by_id(&self, device_id: &str) -> RepositoryResult<Option<Device>> {
        Ok(self.devices.get(device_id).await)
    }

    async fn get_devices_by_user_id(&self, user_id: &str) -> RepositoryResult<Vec<Device>> {
        let mut devices = self.devices.filter(|d| d.user_id == user_id).await;
        devices.sort_by(|a, b| a.device_id.cmp(&b.device_id));
        Ok(devices)
    }

    async fn update_device(&self, device: Device) -> RepositoryResult<()> {
        self.devices.replace(device).await
    }

    async fn update_device_status(
        &self,
        device_id: &str,
        status: DeviceStatus,
        battery_level: i32,
    ) -> RepositoryResult<()> {
        let mut updates = patch("status", serde_json::to_value(status)?);
        updates.insert("batteryLevel".to_string(), Value::from(battery_level));
        self.devices.merge(device_id, updates).await
    }

    async fn delete_device(&self, device_id: &str) -> RepositoryResult<()> {
        self.devices.remove(device_id).await
    }

    async fn observe_device(
        &self,
        device_id: &str,
    ) -> RepositoryResult<watch::Receiver<Option<Device>>> {
        let id = device_id.to_string();
        Ok(self.devices.observe(move |docs| docs.get(&id).cloned()).await)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryGeofenceRepository {
    geofences: Arc<MemoryCollection<Geofence>>,
}

impl InMemoryGeofenceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GeofenceRepository for InMemoryGeofenceRepository {
    async fn create_geofence(&self, geofence: Geofence) -> RepositoryResult<String> {
        self.geofences.insert(geofence).await
    }

    async fn get_geofence_by_id(&self, geofence_id: &str) -> RepositoryResult<Option<Geofence>> {
        Ok(self.geofences.get(geofence_id).await)
    }

    async fn get_geofences_by_user_id(&self, user_id: &str) -> RepositoryResult<Vec<Geofence>> {
        let mut geofences = self.geofences.filter(|g| g.user_id == user_id).await;
        geofences.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.name.cmp(&b.name)));
        Ok(geofences)
    }

    async fn delete_geofence(&self, geofence_id: &str) -> RepositoryResult<()> {
        self.geofences.remove(geofence_id).await
    }
}
