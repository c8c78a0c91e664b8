//! User document and profile payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::Document;
use super::tier::Tier;

/// Account profile stored in the `users` collection, keyed by auth uid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_active_at: Option<DateTime<Utc>>,
    /// Updated after device pairing.
    pub tier: Tier,
    pub subscription_status: String,
    pub subscription_expiry: Option<DateTime<Utc>>,
    pub is_family_admin: bool,
    pub family_id: Option<String>,
    pub profile_incomplete: bool,
    pub privacy_settings: PrivacySettings,
    pub notification_preferences: NotificationPreferences,
    pub usage: UsageAnalytics,
}

impl Default for User {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            display_name: String::new(),
            email: String::new(),
            phone_number: None,
            photo_url: None,
            created_at: None,
            last_active_at: None,
            tier: Tier::Tag,
            subscription_status: "active".to_string(),
            subscription_expiry: None,
            is_family_admin: true,
            family_id: None,
            profile_incomplete: true,
            privacy_settings: PrivacySettings::default(),
            notification_preferences: NotificationPreferences::default(),
            usage: UsageAnalytics::default(),
        }
    }
}

impl User {
    /// Profile created right after a new account signs up.
    pub fn new_profile(
        uid: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
        phone_number: Option<String>,
        photo_url: Option<String>,
    ) -> Self {
        Self {
            user_id: uid.into(),
            display_name: display_name.into(),
            email: email.into(),
            phone_number: phone_number.filter(|p| !p.trim().is_empty()),
            photo_url,
            tier: Tier::Tag,
            profile_incomplete: true,
            ..Self::default()
        }
    }
}

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn document_id(&self) -> &str {
        &self.user_id
    }

    fn set_document_id(&mut self, id: String) {
        self.user_id = id;
    }

    fn stamp(&mut self, now: DateTime<Utc>, created: bool) {
        if created && self.created_at.is_none() {
            self.created_at = Some(now);
        }
        self.last_active_at = Some(now);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrivacySettings {
    pub share_location: bool,
    pub share_activity: bool,
    pub allow_family_invites: bool,
    pub data_retention_days: i32,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            share_location: true,
            share_activity: true,
            allow_family_invites: true,
            data_retention_days: 365,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub push: bool,
    pub email: bool,
    pub sms: bool,
    pub quiet_hours: QuietHours,
    pub alert_types: AlertTypePreferences,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            push: true,
            email: true,
            sms: false,
            quiet_hours: QuietHours::default(),
            alert_types: AlertTypePreferences::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuietHours {
    pub enabled: bool,
    pub start: String,
    pub end: String,
    pub timezone: String,
}

impl Default for QuietHours {
    fn default() -> Self {
        Self {
            enabled: false,
            start: "22:00".to_string(),
            end: "07:00".to_string(),
            timezone: "America/New_York".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertTypePreferences {
    pub geofence: bool,
    pub battery: bool,
    pub activity: bool,
    pub emergency: bool,
}

impl Default for AlertTypePreferences {
    fn default() -> Self {
        Self {
            geofence: true,
            battery: true,
            activity: true,
            emergency: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UsageAnalytics {
    pub last_login_at: Option<DateTime<Utc>>,
    pub total_sessions: i32,
    /// Seconds.
    pub average_session_duration: i64,
    pub features_used: Vec<String>,
}

/// Fields a user may fill in on the profile completion screen.
///
/// Only fields present in the payload are merged into the stored document.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompleteProfileRequest {
    #[validate(custom(function = "shared::validation::validate_full_name"))]
    pub display_name: Option<String>,

    #[validate(custom(function = "shared::validation::validate_phone"))]
    pub phone_number: Option<String>,

    #[serde(rename = "photoURL")]
    #[validate(url(message = "Photo URL must be a valid URL"))]
    pub photo_url: Option<String>,

    pub privacy_settings: Option<PrivacySettings>,

    pub notification_preferences: Option<NotificationPreferences>,
}

impl CompleteProfileRequest {
    /// Converts the payload into a document patch keyed by stored field names.
    pub fn into_updates(self) -> serde_json::Map<String, serde_json::Value> {
        let mut updates = serde_json::Map::new();
        if let Some(name) = self.display_name {
            updates.insert("displayName".into(), name.trim().into());
        }
        if let Some(phone) = self.phone_number {
            updates.insert("phoneNumber".into(), phone.trim().into());
        }
        if let Some(url) = self.photo_url {
            updates.insert("photoURL".into(), url.into());
        }
        if let Some(privacy) = self.privacy_settings {
            if let Ok(value) = serde_json::to_value(privacy) {
                updates.insert("privacySettings".into(), value);
            }
        }
        if let Some(prefs) = self.notification_preferences {
            if let Ok(value) = serde_json::to_value(prefs) {
                updates.insert("notificationPreferences".into(), value);
            }
        }
        updates
    }
}

/// Editable part of the profile document, sent as a full replacement.
///
/// Server-owned fields (id, tier, subscription, family membership, profile
/// completion) are not part of the payload and are ignored when present.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(custom(function = "shared::validation::validate_full_name"))]
    pub display_name: String,

    #[validate(custom(function = "shared::validation::validate_email"))]
    pub email: String,

    #[validate(custom(function = "shared::validation::validate_phone"))]
    pub phone_number: Option<String>,

    #[serde(rename = "photoURL")]
    #[validate(url(message = "Photo URL must be a valid URL"))]
    pub photo_url: Option<String>,

    pub last_active_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub privacy_settings: PrivacySettings,

    #[serde(default)]
    pub notification_preferences: NotificationPreferences,

    pub usage: Option<UsageAnalytics>,
}

impl UpdateUserRequest {
    pub fn apply(self, user: &mut User) {
        user.display_name = self.display_name.trim().to_string();
        user.email = self.email.trim().to_string();
        user.phone_number = self
            .phone_number
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        user.photo_url = self.photo_url;
        if self.last_active_at.is_some() {
            user.last_active_at = self.last_active_at;
        }
        user.privacy_settings = self.privacy_settings;
        user.notification_preferences = self.notification_preferences;
        if let Some(usage) = self.usage {
            user.usage = usage;
        }
    }
}

/// Request to move the user to the tier of a newly paired device.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTierRequest {
    #[validate(length(min = 1, max = 32, message = "Device type is required"))]
    pub device_type: String,
}
