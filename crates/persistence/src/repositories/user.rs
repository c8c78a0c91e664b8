//! User profiles in the `users` collection.

use async_trait::async_trait;
use domain::models::{Document, Tier, User};
use domain::repositories::{RepositoryResult, UserRepository};
use serde_json::{Map, Value};
use tokio::sync::watch;

use super::document::PgDocumentStore;

#[derive(Clone)]
pub struct PgUserRepository {
    store: PgDocumentStore,
}

impl PgUserRepository {
    pub fn new(store: PgDocumentStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, user: User) -> RepositoryResult<String> {
        self.store.insert(user).await
    }

    async fn get_user_by_id(&self, user_id: &str) -> RepositoryResult<Option<User>> {
        self.store.get(user_id).await
    }

    async fn update_user(&self, user: User) -> RepositoryResult<()> {
        self.store.replace(user).await
    }

    async fn update_user_tier(&self, user_id: &str, tier: Tier) -> RepositoryResult<()> {
        let mut updates = Map::new();
        updates.insert("tier".to_string(), serde_json::to_value(tier)?);
        self.store.merge::<User>(user_id, updates).await
    }

    async fn complete_user_profile(
        &self,
        user_id: &str,
        updates: Map<String, Value>,
    ) -> RepositoryResult<()> {
        self.store.merge::<User>(user_id, updates).await
    }

    async fn observe_user(&self, user_id: &str) -> RepositoryResult<watch::Receiver<Option<User>>> {
        let id = user_id.to_string();
        self.store
            .observe(User::COLLECTION, move |store| {
                let id = id.clone();
                async move { store.get::<User>(&id).await }
            })
            .await
    }
}
