//! Generic JSONB document store.
//!
//! Every collection shares the `documents` table. Writes fire a
//! `document_changes` notification carrying `collection/id`; a single
//! listener task rebroadcasts those to in-process observers.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use domain::models::Document;
use domain::repositories::{document_path, RepositoryError, RepositoryResult};
use serde_json::{Map, Value};
use sqlx::postgres::PgListener;
use sqlx::types::Json;
use sqlx::PgPool;
use tokio::sync::{broadcast, watch};
use uuid::Uuid;

use crate::entities::DocumentEntity;
use crate::metrics::{record_document_write, QueryTimer};

/// Notification channel raised by the documents trigger.
pub const CHANGE_CHANNEL: &str = "document_changes";

const CHANGE_BUFFER: usize = 256;
const LISTENER_RETRY: Duration = Duration::from_secs(1);

pub(crate) fn backend(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Backend(err.to_string())
}

fn in_collection(path: &str, collection: &str) -> bool {
    path.split_once('/')
        .map_or(false, |(name, _)| name == collection)
}

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    changes: broadcast::Sender<String>,
}

impl PgDocumentStore {
    /// Store without a change feed; observers only see their initial value.
    pub fn new(pool: PgPool) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_BUFFER);
        Self { pool, changes }
    }

    /// Store whose observers follow `document_changes` notifications.
    pub async fn with_change_feed(pool: PgPool) -> Result<Self, sqlx::Error> {
        let store = Self::new(pool);
        let mut listener = PgListener::connect_with(&store.pool).await?;
        listener.listen(CHANGE_CHANNEL).await?;

        let changes = store.changes.clone();
        tokio::spawn(async move {
            loop {
                match listener.recv().await {
                    Ok(notification) => {
                        let _ = changes.send(notification.payload().to_string());
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Document change listener error");
                        tokio::time::sleep(LISTENER_RETRY).await;
                    }
                }
            }
        });

        tracing::info!(channel = CHANGE_CHANNEL, "Document change feed started");
        Ok(store)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn insert<T: Document>(&self, mut doc: T) -> RepositoryResult<String> {
        if doc.document_id().is_empty() {
            doc.set_document_id(Uuid::new_v4().to_string());
        }
        let id = doc.document_id().to_string();
        doc.stamp(Utc::now(), true);
        let data = serde_json::to_value(&doc)?;

        let timer = QueryTimer::new("insert_document");
        let result = sqlx::query(
            r#"
            INSERT INTO documents (collection, document_id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, document_id) DO NOTHING
            "#,
        )
        .bind(T::COLLECTION)
        .bind(&id)
        .bind(Json(data))
        .execute(&self.pool)
        .await;
        timer.record();

        if result.map_err(backend)?.rows_affected() == 0 {
            return Err(RepositoryError::Conflict(document_path(T::COLLECTION, &id)));
        }
        record_document_write(T::COLLECTION, "insert");
        Ok(id)
    }

    pub async fn get<T: Document>(&self, id: &str) -> RepositoryResult<Option<T>> {
        let timer = QueryTimer::new("get_document");
        let result = sqlx::query_as::<_, DocumentEntity>(
            r#"
            SELECT collection, document_id, data, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND document_id = $2
            "#,
        )
        .bind(T::COLLECTION)
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        match result.map_err(backend)? {
            Some(entity) => Ok(Some(entity.into_document()?)),
            None => Ok(None),
        }
    }

    /// Documents whose top-level string `field` equals `value`, oldest first.
    pub async fn list_by_field<T: Document>(
        &self,
        field: &str,
        value: &str,
    ) -> RepositoryResult<Vec<T>> {
        let timer = QueryTimer::new("list_documents_by_field");
        let result = sqlx::query_as::<_, DocumentEntity>(
            r#"
            SELECT collection, document_id, data, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND data->>$2 = $3
            ORDER BY created_at, document_id
            "#,
        )
        .bind(T::COLLECTION)
        .bind(field)
        .bind(value)
        .fetch_all(&self.pool)
        .await;
        timer.record();

        result
            .map_err(backend)?
            .into_iter()
            .map(|entity| entity.into_document().map_err(RepositoryError::from))
            .collect()
    }

    pub async fn replace<T: Document>(&self, mut doc: T) -> RepositoryResult<()> {
        let id = doc.document_id().to_string();
        doc.stamp(Utc::now(), false);
        let data = serde_json::to_value(&doc)?;

        let timer = QueryTimer::new("replace_document");
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET data = $3, updated_at = NOW()
            WHERE collection = $1 AND document_id = $2
            "#,
        )
        .bind(T::COLLECTION)
        .bind(&id)
        .bind(Json(data))
        .execute(&self.pool)
        .await;
        timer.record();

        if result.map_err(backend)?.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(document_path(T::COLLECTION, &id)));
        }
        record_document_write(T::COLLECTION, "replace");
        Ok(())
    }

    /// Overwrites the given top-level fields inside one transaction.
    ///
    /// The merged body must still decode as `T`, and server timestamps are
    /// re-stamped the same way a full replace would.
    pub async fn merge<T: Document>(&self, id: &str, patch: Map<String, Value>) -> RepositoryResult<()> {
        let timer = QueryTimer::new("merge_document");
        let mut tx = self.pool.begin().await.map_err(backend)?;

        let current = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            SELECT data FROM documents
            WHERE collection = $1 AND document_id = $2
            FOR UPDATE
            "#,
        )
        .bind(T::COLLECTION)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(backend)?
        .ok_or_else(|| RepositoryError::NotFound(document_path(T::COLLECTION, id)))?;

        let mut value = current.0;
        if let Value::Object(fields) = &mut value {
            fields.extend(patch);
        }
        let mut merged: T = serde_json::from_value(value)?;
        merged.set_document_id(id.to_string());
        merged.stamp(Utc::now(), false);
        let data = serde_json::to_value(&merged)?;

        sqlx::query(
            r#"
            UPDATE documents
            SET data = $3, updated_at = NOW()
            WHERE collection = $1 AND document_id = $2
            "#,
        )
        .bind(T::COLLECTION)
        .bind(id)
        .bind(Json(data))
        .execute(&mut *tx)
        .await
        .map_err(backend)?;

        tx.commit().await.map_err(backend)?;
        timer.record();
        record_document_write(T::COLLECTION, "merge");
        Ok(())
    }

    pub async fn delete<T: Document>(&self, id: &str) -> RepositoryResult<()> {
        let timer = QueryTimer::new("delete_document");
        let result = sqlx::query(
            r#"
            DELETE FROM documents
            WHERE collection = $1 AND document_id = $2
            "#,
        )
        .bind(T::COLLECTION)
        .bind(id)
        .execute(&self.pool)
        .await;
        timer.record();

        if result.map_err(backend)?.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(document_path(T::COLLECTION, id)));
        }
        record_document_write(T::COLLECTION, "delete");
        Ok(())
    }

    /// Publishes `load`, re-run whenever a document in `collection` changes.
    pub async fn observe<V, F, Fut>(
        &self,
        collection: &'static str,
        load: F,
    ) -> RepositoryResult<watch::Receiver<V>>
    where
        V: Send + Sync + 'static,
        F: Fn(PgDocumentStore) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RepositoryResult<V>> + Send + 'static,
    {
        let mut changes = self.changes.subscribe();
        let (tx, rx) = watch::channel(load(self.clone()).await?);
        let store = self.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tx.closed() => break,
                    changed = changes.recv() => {
                        let reload = match changed {
                            Ok(path) => in_collection(&path, collection),
                            Err(broadcast::error::RecvError::Lagged(_)) => true,
                            Err(broadcast::error::RecvError::Closed) => break,
                        };
                        if reload {
                            match load(store.clone()).await {
                                Ok(value) => {
                                    tx.send_replace(value);
                                }
                                Err(e) => {
                                    tracing::warn!(collection, error = %e, "Observer reload failed");
                                }
                            }
                        }
                    }
                }
            }
            tracing::debug!(collection, "Observer closed");
        });

        Ok(rx)
    }
}
