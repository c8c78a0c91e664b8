//! Alert document.
//!
//! Alerts are produced by trackers and stored as-is; classification fields
//! hold the values listed in [`super::constants`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Document, GeoPoint};
use super::tier::Tier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Alert {
    pub alert_id: String,
    pub user_id: String,
    pub pet_id: String,
    pub device_id: Option<String>,
    pub alert_type: String,
    pub category: String,
    pub severity: String,
    /// Tiers allowed to receive this alert; empty means all.
    pub tier_restriction: Vec<Tier>,
    pub title: String,
    pub message: String,
    pub short_message: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub context_data: AlertContextData,
    /// active, acknowledged, resolved, dismissed or expired
    pub status: String,
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub acknowledged_by: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub family_notification: FamilyNotification,
    pub ai_generated: bool,
    pub suppression_rules: AlertSuppressionRules,
    pub user_feedback: AlertUserFeedback,
    pub performance: AlertPerformance,
    pub notifications: Vec<AlertNotification>,
    pub related_events: Vec<RelatedEvent>,
    pub learning_data: AlertLearningData,
}

impl Default for Alert {
    fn default() -> Self {
        Self {
            alert_id: String::new(),
            user_id: String::new(),
            pet_id: String::new(),
            device_id: None,
            alert_type: String::new(),
            category: String::new(),
            severity: "medium".to_string(),
            tier_restriction: Vec::new(),
            title: String::new(),
            message: String::new(),
            short_message: String::new(),
            timestamp: None,
            expires_at: None,
            context_data: AlertContextData::default(),
            status: "active".to_string(),
            acknowledged_at: None,
            acknowledged_by: None,
            resolved_at: None,
            family_notification: FamilyNotification::default(),
            ai_generated: false,
            suppression_rules: AlertSuppressionRules::default(),
            user_feedback: AlertUserFeedback::default(),
            performance: AlertPerformance::default(),
            notifications: Vec::new(),
            related_events: Vec::new(),
            learning_data: AlertLearningData::default(),
        }
    }
}

impl Alert {
    pub fn visible_to(&self, tier: Tier) -> bool {
        self.tier_restriction.is_empty() || self.tier_restriction.contains(&tier)
    }
}

impl Document for Alert {
    const COLLECTION: &'static str = "alerts";

    fn document_id(&self) -> &str {
        &self.alert_id
    }

    fn set_document_id(&mut self, id: String) {
        self.alert_id = id;
    }

    fn stamp(&mut self, now: DateTime<Utc>, created: bool) {
        if created && self.timestamp.is_none() {
            self.timestamp = Some(now);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertContextData {
    pub location: Option<GeoPoint>,
    pub geofence_id: Option<String>,
    pub geofence_name: Option<String>,
    pub battery_level: Option<i32>,
    /// km/h
    pub speed: Option<f64>,
    pub direction: Option<String>,
    pub weather: Option<String>,
    pub time_context: Option<String>,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FamilyNotification {
    pub notified_members: Vec<String>,
    pub response_received: Vec<String>,
    pub coordinated_response: bool,
    pub primary_responder: Option<String>,
}

impl Default for FamilyNotification {
    fn default() -> Self {
        Self {
            notified_members: Vec::new(),
            response_received: Vec::new(),
            coordinated_response: true,
            primary_responder: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertSuppressionRules {
    /// Seconds.
    pub similar_alerts_window: i32,
    pub quiet_hours_override: bool,
    pub family_coordination: bool,
    pub contextual_suppression: bool,
}

impl Default for AlertSuppressionRules {
    fn default() -> Self {
        Self {
            similar_alerts_window: 300,
            quiet_hours_override: false,
            family_coordination: true,
            contextual_suppression: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertUserFeedback {
    pub helpful: Option<bool>,
    pub false_positive: Option<bool>,
    /// 1-5
    pub relevance: Option<i32>,
    pub feedback_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertPerformance {
    pub response_time: i64,
    pub engagement_type: String,
    pub follow_up_action: Option<String>,
    pub resolution: Option<String>,
    pub accuracy: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertNotification {
    /// push, email or sms
    pub channel: String,
    pub recipient: String,
    pub sent_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub read_at: Option<DateTime<Utc>>,
    pub clicked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelatedEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub event_id: String,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertLearningData {
    pub pattern_match: f64,
    pub anomaly_score: f64,
    pub seasonal_context: String,
    pub historical_comparison: String,
    pub improvement_suggestions: Vec<String>,
}
