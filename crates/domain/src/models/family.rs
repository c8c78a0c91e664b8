//! Family sharing documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyRole {
    Owner,
    #[default]
    Family,
    Emergency,
    Vet,
    Trainer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    View,
    Alerts,
    Emergency,
    Settings,
    ManageFamily,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    Active,
    Invited,
    Disabled,
}

impl FamilyRole {
    /// Permissions granted to a role when none are given explicitly.
    pub fn default_permissions(&self) -> Vec<Permission> {
        match self {
            FamilyRole::Owner => vec![
                Permission::View,
                Permission::Alerts,
                Permission::Emergency,
                Permission::Settings,
                Permission::ManageFamily,
            ],
            FamilyRole::Family => vec![Permission::View, Permission::Alerts, Permission::Emergency],
            FamilyRole::Emergency => vec![Permission::Emergency],
            FamilyRole::Vet | FamilyRole::Trainer => vec![Permission::View],
        }
    }
}

/// Household sharing pets and devices, stored in `families`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Family {
    pub family_id: String,
    pub admin_user_id: String,
    pub family_name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub members: Vec<FamilyMember>,
    pub shared_settings: SharedFamilySettings,
    pub analytics: FamilyAnalytics,
}

impl Family {
    pub fn member(&self, user_id: &str) -> Option<&FamilyMember> {
        self.members.iter().find(|m| m.user_id == user_id)
    }

    pub fn has_permission(&self, user_id: &str, permission: Permission) -> bool {
        self.member(user_id).is_some_and(|m| {
            m.status == MemberStatus::Active && m.permissions.contains(&permission)
        })
    }
}

impl Document for Family {
    const COLLECTION: &'static str = "families";

    fn document_id(&self) -> &str {
        &self.family_id
    }

    fn set_document_id(&mut self, id: String) {
        self.family_id = id;
    }

    fn stamp(&mut self, now: DateTime<Utc>, created: bool) {
        if created && self.created_at.is_none() {
            self.created_at = Some(now);
        }
        self.updated_at = Some(now);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FamilyMember {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub role: FamilyRole,
    pub permissions: Vec<Permission>,
    pub added_at: Option<DateTime<Utc>>,
    pub added_by: String,
    pub status: MemberStatus,
    pub last_active: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SharedFamilySettings {
    /// User ids in call order.
    pub emergency_contact_order: Vec<String>,
    pub allow_child_accounts: bool,
    pub require_approval_for_new_pets: bool,
    pub shared_notifications: bool,
    pub alert_coordination: bool,
}

impl Default for SharedFamilySettings {
    fn default() -> Self {
        Self {
            emergency_contact_order: Vec::new(),
            allow_child_accounts: false,
            require_approval_for_new_pets: true,
            shared_notifications: true,
            alert_coordination: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FamilyAnalytics {
    pub total_pets: i32,
    pub total_devices: i32,
    pub active_members: i32,
    pub shared_activities: i32,
}
