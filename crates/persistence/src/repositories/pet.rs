//! Pet profiles in the `pets` collection.

use async_trait::async_trait;
use domain::models::{DeviceInfo, Document, Pet};
use domain::repositories::{PetRepository, RepositoryResult};
use serde_json::Map;
use tokio::sync::watch;

use super::document::PgDocumentStore;

#[derive(Clone)]
pub struct PgPetRepository {
    store: PgDocumentStore,
}

impl PgPetRepository {
    pub fn new(store: PgDocumentStore) -> Self {
        Self { store }
    }
}

async fn pets_of(store: &PgDocumentStore, user_id: &str) -> RepositoryResult<Vec<Pet>> {
    let mut pets: Vec<Pet> = store.list_by_field("userId", user_id).await?;
    pets.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.pet_id.cmp(&b.pet_id)));
    Ok(pets)
}

#[async_trait]
impl PetRepository for PgPetRepository {
    async fn create_pet(&self, pet: Pet) -> RepositoryResult<String> {
        self.store.insert(pet).await
    }

    async fn get_pet_by_id(&self, pet_id: &str) -> RepositoryResult<Option<Pet>> {
        self.store.get(pet_id).await
    }

    async fn get_pets_by_user_id(&self, user_id: &str) -> RepositoryResult<Vec<Pet>> {
        pets_of(&self.store, user_id).await
    }

    async fn update_pet(&self, pet: Pet) -> RepositoryResult<()> {
        self.store.replace(pet).await
    }

    async fn update_pet_device(&self, pet_id: &str, device: DeviceInfo) -> RepositoryResult<()> {
        let mut updates = Map::new();
        updates.insert("currentDevice".to_string(), serde_json::to_value(device)?);
        self.store.merge::<Pet>(pet_id, updates).await
    }

    async fn delete_pet(&self, pet_id: &str) -> RepositoryResult<()> {
        self.store.delete::<Pet>(pet_id).await
    }

    async fn observe_pets(&self, user_id: &str) -> RepositoryResult<watch::Receiver<Vec<Pet>>> {
        let id = user_id.to_string();
        self.store
            .observe(Pet::COLLECTION, move |store| {
                let id = id.clone();
                async move { pets_of(&store, &id).await }
            })
            .await
    }
}
