//! Safe zones in the `geofences` collection.

use async_trait::async_trait;
use domain::models::Geofence;
use domain::repositories::{GeofenceRepository, RepositoryResult};

use super::document::PgDocumentStore;

#[derive(Clone)]
pub struct PgGeofenceRepository {
    store: PgDocumentStore,
}

impl PgGeofenceRepository {
    pub fn new(store: PgDocumentStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl GeofenceRepository for PgGeofenceRepository {
    async fn create_geofence(&self, geofence: Geofence) -> RepositoryResult<String> {
        self.store.insert(geofence).await
    }

    async fn get_geofence_by_id(&self, geofence_id: &str) -> RepositoryResult<Option<Geofence>> {
        self.store.get(geofence_id).await
    }

    /// Highest priority first, then by name.
    async fn get_geofences_by_user_id(&self, user_id: &str) -> RepositoryResult<Vec<Geofence>> {
        let mut geofences: Vec<Geofence> = self.store.list_by_field("userId", user_id).await?;
        geofences.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.name.cmp(&b.name)));
        Ok(geofences)
    }

    async fn delete_geofence(&self, geofence_id: &str) -> RepositoryResult<()> {
        self.store.delete::<Geofence>(geofence_id).await
    }
}
