//! Paired trackers in the `devices` collection.

use async_trait::async_trait;
use domain::models::{Device, DeviceStatus, Document};
use domain::repositories::{DeviceRepository, RepositoryResult};
use serde_json::{Map, Value};
use tokio::sync::watch;

use super::document::PgDocumentStore;

#[derive(Clone)]
pub struct PgDeviceRepository {
    store: PgDocumentStore,
}

impl PgDeviceRepository {
    pub fn new(store: PgDocumentStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DeviceRepository for PgDeviceRepository {
    async fn create_device(&self, device: Device) -> RepositoryResult<String> {
        self.store.insert(device).await
    }

    async fn get_device_by_id(&self, device_id: &str) -> RepositoryResult<Option<Device>> {
        self.store.get(device_id).await
    }

    async fn get_devices_by_user_id(&self, user_id: &str) -> RepositoryResult<Vec<Device>> {
        let mut devices: Vec<Device> = self.store.list_by_field("userId", user_id).await?;
        devices.sort_by(|a, b| a.device_id.cmp(&b.device_id));
        Ok(devices)
    }

    async fn update_device(&self, device: Device) -> RepositoryResult<()> {
        self.store.replace(device).await
    }

    async fn update_device_status(
        &self,
        device_id: &str,
        status: DeviceStatus,
        battery_level: i32,
    ) -> RepositoryResult<()> {
        let mut updates = Map::new();
        updates.insert("status".to_string(), serde_json::to_value(status)?);
        updates.insert("batteryLevel".to_string(), Value::from(battery_level));
        self.store.merge::<Device>(device_id, updates).await
    }

    async fn delete_device(&self, device_id: &str) -> RepositoryResult<()> {
        self.store.delete::<Device>(device_id).await
    }

    async fn observe_device(
        &self,
        device_id: &str,
    ) -> RepositoryResult<watch::Receiver<Option<Device>>> {
        let id = device_id.to_string();
        self.store
            .observe(Device::COLLECTION, move |store| {
                let id = id.clone();
                async move { store.get::<Device>(&id).await }
            })
            .await
    }
}
