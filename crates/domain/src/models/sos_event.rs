//! Lost-pet emergency events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Document, GeoPoint};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SosEvent {
    pub sos_id: String,
    pub pet_id: String,
    pub user_id: String,
    pub device_id: String,
    /// manual, auto_geofence, auto_movement or auto_panic
    pub trigger_type: String,
    /// app, device, ai_detection or family_member
    pub trigger_source: String,
    pub is_active: bool,
    /// low, medium, high or critical
    pub severity: String,
    pub trigger_location: SosLocation,
    pub triggered_at: Option<DateTime<Utc>>,
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub acknowledged_by: String,
    pub resolved_by: String,
    /// 1-5
    pub escalation_level: i32,
    pub escalation_history: Vec<EscalationEvent>,
    pub context_data: SosContextData,
    pub response: SosResponse,
    pub resolution: SosResolution,
    pub analytics: SosAnalytics,
    pub follow_up: SosFollowUp,
}

impl Default for SosEvent {
    fn default() -> Self {
        Self {
            sos_id: String::new(),
            pet_id: String::new(),
            user_id: String::new(),
            device_id: String::new(),
            trigger_type: String::new(),
            trigger_source: String::new(),
            is_active: false,
            severity: "high".to_string(),
            trigger_location: SosLocation::default(),
            triggered_at: None,
            acknowledged_at: None,
            resolved_at: None,
            acknowledged_by: String::new(),
            resolved_by: String::new(),
            escalation_level: 1,
            escalation_history: Vec::new(),
            context_data: SosContextData::default(),
            response: SosResponse::default(),
            resolution: SosResolution::default(),
            analytics: SosAnalytics::default(),
            follow_up: SosFollowUp::default(),
        }
    }
}

impl Document for SosEvent {
    const COLLECTION: &'static str = "sos_events";

    fn document_id(&self) -> &str {
        &self.sos_id
    }

    fn set_document_id(&mut self, id: String) {
        self.sos_id = id;
    }

    fn stamp(&mut self, now: DateTime<Utc>, created: bool) {
        if created && self.triggered_at.is_none() {
            self.triggered_at = Some(now);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SosLocation {
    pub coordinates: Option<GeoPoint>,
    pub accuracy: f64,
    pub address: Option<String>,
    pub nearest_zone: Option<String>,
    pub weather: WeatherInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherInfo {
    pub condition: String,
    /// Celsius.
    pub temperature: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EscalationEvent {
    pub level: i32,
    pub triggered_at: Option<DateTime<Utc>>,
    /// notify_family, call_emergency_contact or dispatch
    pub action: String,
    pub contacts: Vec<String>,
    /// Seconds.
    pub response_time: i64,
    pub success: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SosContextData {
    pub battery_level: i32,
    pub last_known_speed: f64,
    pub weather_conditions: String,
    pub time_of_day: String,
    pub pet_activity_level: String,
    pub recent_movement: String,
    pub nearby_family: bool,
    pub historical_context: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SosResponse {
    pub family_notified: i32,
    pub first_response: FirstResponse,
    pub search_effort: SearchEffort,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FirstResponse {
    pub responder_id: String,
    pub response_time: i64,
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchEffort {
    pub duration: i64,
    pub searchers_involved: i32,
    /// Kilometers of radius.
    pub search_area: f64,
    pub methods_used: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SosResolution {
    /// false_alarm, found_safe, emergency_resolved or ongoing
    #[serde(rename = "type")]
    pub resolution_type: String,
    pub notes: String,
    pub found_location: Option<GeoPoint>,
    pub found_by: String,
    /// safe, injured, stressed or unknown
    pub pet_condition: String,
    pub followup_required: bool,
    pub vet_visit_needed: bool,
}

impl Default for SosResolution {
    fn default() -> Self {
        Self {
            resolution_type: String::new(),
            notes: String::new(),
            found_location: None,
            found_by: String::new(),
            pet_condition: "safe".to_string(),
            followup_required: false,
            vet_visit_needed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SosAnalytics {
    /// Seconds to first acknowledgment.
    pub response_time: i64,
    /// Seconds to resolution.
    pub resolution_time: i64,
    pub false_alarm: Option<bool>,
    pub search_effectiveness: f64,
    pub trauma_level: String,
    pub cost_estimate: f64,
    pub lessons_learned: Vec<String>,
}

impl Default for SosAnalytics {
    fn default() -> Self {
        Self {
            response_time: 0,
            resolution_time: 0,
            false_alarm: None,
            search_effectiveness: 0.0,
            trauma_level: "none".to_string(),
            cost_estimate: 0.0,
            lessons_learned: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SosFollowUp {
    pub behavior_changes: Vec<String>,
    pub training_needed: bool,
    pub geofence_adjustments: Vec<String>,
    pub alert_rule_changes: Vec<String>,
    pub family_education: Vec<String>,
}
