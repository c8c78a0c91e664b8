//! Document row mapping.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

/// Database row mapping for the documents table.
#[derive(Debug, Clone, FromRow)]
pub struct DocumentEntity {
    pub collection: String,
    pub document_id: String,
    pub data: Json<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DocumentEntity {
    /// Decodes the JSON body into a typed document.
    pub fn into_document<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.0)
    }
}
