//! Requests from family members to change pets they do not own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::Document;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PetManagementRequest {
    pub request_id: String,
    pub family_user_id: String,
    pub family_id: String,
    /// `None` for create requests.
    pub pet_id: Option<String>,
    /// create, update or delete
    pub action: String,
    pub encrypted_details: Map<String, Value>,
    /// pending, approved or rejected
    pub status: String,
    pub submitted_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl Default for PetManagementRequest {
    fn default() -> Self {
        Self {
            request_id: String::new(),
            family_user_id: String::new(),
            family_id: String::new(),
            pet_id: None,
            action: String::new(),
            encrypted_details: Map::new(),
            status: "pending".to_string(),
            submitted_at: None,
            reviewed_by: None,
            reviewed_at: None,
        }
    }
}

impl PetManagementRequest {
    pub fn is_pending(&self) -> bool {
        self.status == "pending"
    }
}

impl Document for PetManagementRequest {
    const COLLECTION: &'static str = "pet_management_requests";

    fn document_id(&self) -> &str {
        &self.request_id
    }

    fn set_document_id(&mut self, id: String) {
        self.request_id = id;
    }

    fn stamp(&mut self, now: DateTime<Utc>, created: bool) {
        if created && self.submitted_at.is_none() {
            self.submitted_at = Some(now);
        }
    }
}
