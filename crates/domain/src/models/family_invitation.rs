//! Invitation to join a family.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Document;
use super::family::{FamilyRole, Permission};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    #[default]
    Sent,
    Accepted,
    Declined,
    Expired,
    Revoked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FamilyInvitation {
    pub invite_id: String,
    pub from_user_id: String,
    pub from_user_name: String,
    pub from_user_email: String,
    pub family_id: String,
    pub to_email: String,
    pub to_name: String,
    pub to_phone: Option<String>,
    pub proposed_role: FamilyRole,
    pub proposed_permissions: Vec<Permission>,
    pub pet_access: PetAccess,
    pub status: InvitationStatus,
    pub invite_code: String,
    pub invite_url: String,
    pub sent_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub responded_at: Option<DateTime<Utc>>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub personal_message: Option<String>,
    pub language: String,
    pub email_template: String,
    pub tracking: InvitationTracking,
    pub security: InvitationSecurity,
    /// standard, emergency or temporary
    pub invitation_type: String,
    /// low, normal, high or urgent
    pub priority: String,
    /// manual, bulk, suggested or auto
    pub source: String,
    pub follow_up: InvitationFollowUp,
    pub integrations: InvitationIntegrations,
}

impl Default for FamilyInvitation {
    fn default() -> Self {
        Self {
            invite_id: String::new(),
            from_user_id: String::new(),
            from_user_name: String::new(),
            from_user_email: String::new(),
            family_id: String::new(),
            to_email: String::new(),
            to_name: String::new(),
            to_phone: None,
            proposed_role: FamilyRole::Family,
            proposed_permissions: Vec::new(),
            pet_access: PetAccess::default(),
            status: InvitationStatus::Sent,
            invite_code: String::new(),
            invite_url: String::new(),
            sent_at: None,
            expires_at: None,
            responded_at: None,
            accepted_at: None,
            personal_message: None,
            language: "en".to_string(),
            email_template: "family_member_invite".to_string(),
            tracking: InvitationTracking::default(),
            security: InvitationSecurity::default(),
            invitation_type: "standard".to_string(),
            priority: "normal".to_string(),
            source: "manual".to_string(),
            follow_up: InvitationFollowUp::default(),
            integrations: InvitationIntegrations::default(),
        }
    }
}

impl FamilyInvitation {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.status == InvitationStatus::Expired || self.expires_at.is_some_and(|at| at <= now)
    }
}

impl Document for FamilyInvitation {
    const COLLECTION: &'static str = "family_invitations";

    fn document_id(&self) -> &str {
        &self.invite_id
    }

    fn set_document_id(&mut self, id: String) {
        self.invite_id = id;
    }

    fn stamp(&mut self, now: DateTime<Utc>, created: bool) {
        if created && self.sent_at.is_none() {
            self.sent_at = Some(now);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PetAccess {
    pub all_pets: bool,
    pub specific_pets: Vec<String>,
    pub future_access_permitted: bool,
}

impl Default for PetAccess {
    fn default() -> Self {
        Self {
            all_pets: true,
            specific_pets: Vec::new(),
            future_access_permitted: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvitationTracking {
    pub email_sent: bool,
    pub email_delivered: bool,
    pub email_opened: bool,
    pub reminders_sent: i32,
    pub link_clicked: bool,
    pub app_downloaded: bool,
    pub viewed_at: Option<DateTime<Utc>>,
    pub email_stats: EmailStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmailStats {
    pub sent_count: i32,
    pub open_rate: f64,
    pub click_rate: f64,
    pub bounced: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvitationSecurity {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub verification_required: bool,
    pub two_factor_required: bool,
    #[serde(rename = "responseIP")]
    pub response_ip: Option<String>,
    pub response_user_agent: Option<String>,
    pub security_flags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvitationFollowUp {
    pub reminder_scheduled: bool,
    pub reminder_sent_at: Option<DateTime<Utc>>,
    pub escalate_to_phone: bool,
    pub escalate_to_admin: bool,
    pub auto_expire: bool,
    pub onboarding_required: bool,
    pub welcome_message_sent: bool,
    pub tutorial_assigned: String,
}

impl Default for InvitationFollowUp {
    fn default() -> Self {
        Self {
            reminder_scheduled: false,
            reminder_sent_at: None,
            escalate_to_phone: false,
            escalate_to_admin: false,
            auto_expire: true,
            onboarding_required: true,
            welcome_message_sent: false,
            tutorial_assigned: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvitationIntegrations {
    pub calendar_invite: bool,
    pub slack_notification: bool,
    pub email_list_subscription: Option<String>,
}
