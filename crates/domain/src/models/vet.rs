//! SENSE-tier veterinarian contact, stored encrypted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Document;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vet {
    pub vet_id: String,
    pub user_id: String,
    pub encrypted_clinic_name: String,
    pub encrypted_vet_name: String,
    pub encrypted_contact: EncryptedVetContact,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncryptedVetContact {
    pub encrypted_phone: String,
    pub encrypted_email: String,
}

impl Document for Vet {
    const COLLECTION: &'static str = "vets";

    fn document_id(&self) -> &str {
        &self.vet_id
    }

    fn set_document_id(&mut self, id: String) {
        self.vet_id = id;
    }

    fn stamp(&mut self, now: DateTime<Utc>, created: bool) {
        if created && self.created_at.is_none() {
            self.created_at = Some(now);
        }
    }
}
