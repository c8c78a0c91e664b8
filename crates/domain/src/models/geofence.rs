//! Geofence zone document.
//!
//! Zones are stored and listed here; entry/exit detection runs on the
//! tracker, so the analytics and AI sub-structures are carried as data only.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::{Document, GeoPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeofenceShape {
    #[default]
    Circle,
    Polygon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeofenceCreator {
    #[default]
    User,
    AiRecommendation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    Low,
    #[default]
    Medium,
    High,
}

/// A named zone around a pet's usual location, stored in `geofences`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Geofence {
    pub geofence_id: String,
    pub user_id: String,
    pub pet_id: String,
    pub name: String,
    pub description: String,
    pub center: Option<GeoPoint>,
    /// Meters, 20-1000.
    pub radius: f64,
    pub shape: GeofenceShape,
    pub color: String,
    pub is_active: bool,
    /// 1-5, higher is more important.
    pub priority: i32,
    pub created_by: GeofenceCreator,
    pub alert_settings: GeofenceAlertSettings,
    pub schedule: GeofenceSchedule,
    pub behavior_patterns: GeofenceBehaviorPatterns,
    pub analytics: GeofenceAnalytics,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_triggered: Option<DateTime<Utc>>,
    pub ai_optimization: GeofenceAiOptimization,
}

impl Default for Geofence {
    fn default() -> Self {
        Self {
            geofence_id: String::new(),
            user_id: String::new(),
            pet_id: String::new(),
            name: String::new(),
            description: String::new(),
            center: None,
            radius: 0.0,
            shape: GeofenceShape::Circle,
            color: "#4CAF50".to_string(),
            is_active: true,
            priority: 1,
            created_by: GeofenceCreator::User,
            alert_settings: GeofenceAlertSettings::default(),
            schedule: GeofenceSchedule::default(),
            behavior_patterns: GeofenceBehaviorPatterns::default(),
            analytics: GeofenceAnalytics::default(),
            created_at: None,
            updated_at: None,
            last_triggered: None,
            ai_optimization: GeofenceAiOptimization::default(),
        }
    }
}

impl Document for Geofence {
    const COLLECTION: &'static str = "geofences";

    fn document_id(&self) -> &str {
        &self.geofence_id
    }

    fn set_document_id(&mut self, id: String) {
        self.geofence_id = id;
    }

    fn stamp(&mut self, now: DateTime<Utc>, created: bool) {
        if created && self.created_at.is_none() {
            self.created_at = Some(now);
        }
        self.updated_at = Some(now);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct GeofenceAlertSettings {
    pub on_entry: bool,
    pub on_exit: bool,
    #[serde(rename = "autoSOS")]
    pub auto_sos: bool,
    /// Seconds.
    #[serde(rename = "autoSOSDelay")]
    #[validate(range(min = 0, max = 86400, message = "Auto SOS delay must be 0-86400 seconds"))]
    pub auto_sos_delay: i32,
    pub sensitivity: Sensitivity,
    pub quiet_hours: bool,
    pub family_notification: bool,
    pub emergency_escalation: bool,
}

impl Default for GeofenceAlertSettings {
    fn default() -> Self {
        Self {
            on_entry: true,
            on_exit: true,
            auto_sos: false,
            auto_sos_delay: 300,
            sensitivity: Sensitivity::Medium,
            quiet_hours: true,
            family_notification: true,
            emergency_escalation: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeofenceSchedule {
    pub enabled: bool,
    pub daily_schedule: Vec<DailySchedule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DailySchedule {
    /// `HH:MM`
    pub start: String,
    pub end: String,
    pub days: Vec<String>,
    pub timezone: String,
}

impl Default for DailySchedule {
    fn default() -> Self {
        Self {
            start: String::new(),
            end: String::new(),
            days: Vec::new(),
            timezone: "America/New_York".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeofenceBehaviorPatterns {
    pub average_stay_duration: i64,
    pub common_entry_times: Vec<String>,
    pub common_exit_times: Vec<String>,
    pub weekday_pattern: f64,
    pub weekend_pattern: f64,
    pub seasonal_variation: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeofenceAnalytics {
    pub total_entries: i32,
    pub total_exits: i32,
    pub average_stay_duration: i64,
    pub last_entry: Option<DateTime<Utc>>,
    pub last_exit: Option<DateTime<Utc>>,
    pub false_alerts: i32,
    pub accuracy: i32,
    pub hourly_distribution: HashMap<String, i32>,
    pub weekly_distribution: HashMap<String, i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeofenceAiOptimization {
    pub suggested_radius: Option<f64>,
    pub optimization_score: i32,
    pub last_optimized: Option<DateTime<Utc>>,
    pub improvement_potential: Sensitivity,
    pub recommendations: Vec<String>,
}

impl Default for GeofenceAiOptimization {
    fn default() -> Self {
        Self {
            suggested_radius: None,
            optimization_score: 0,
            last_optimized: None,
            improvement_potential: Sensitivity::Low,
            recommendations: Vec::new(),
        }
    }
}

fn default_color() -> String {
    "#4CAF50".to_string()
}

fn default_priority() -> i32 {
    1
}

/// Request payload for creating a geofence.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGeofenceRequest {
    #[validate(length(min = 1, max = 128, message = "Pet ID is required"))]
    pub pet_id: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: String,

    #[validate(nested)]
    pub center: GeoPoint,

    #[validate(custom(function = "shared::validation::validate_geofence_radius"))]
    pub radius: f64,

    #[serde(default = "default_color")]
    #[validate(custom(function = "shared::validation::validate_hex_color"))]
    pub color: String,

    #[serde(default = "default_priority")]
    #[validate(custom(function = "shared::validation::validate_geofence_priority"))]
    pub priority: i32,

    #[serde(default)]
    #[validate(nested)]
    pub alert_settings: GeofenceAlertSettings,

    #[serde(default)]
    pub schedule: GeofenceSchedule,
}

impl CreateGeofenceRequest {
    pub fn into_geofence(self, user_id: &str) -> Geofence {
        Geofence {
            user_id: user_id.to_string(),
            pet_id: self.pet_id,
            name: self.name.trim().to_string(),
            description: self.description,
            center: Some(self.center),
            radius: self.radius,
            color: self.color,
            priority: self.priority,
            alert_settings: self.alert_settings,
            schedule: self.schedule,
            ..Geofence::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(radius: f64, priority: i32) -> CreateGeofenceRequest {
        serde_json::from_value(serde_json::json!({
            "petId": "p1",
            "name": "Home",
            "center": { "latitude": 40.7128, "longitude": -74.006 },
            "radius": radius,
            "priority": priority
        }))
        .unwrap()
    }

    #[test]
    fn test_geofence_defaults() {
        let geofence = Geofence::default();
        assert_eq!(geofence.color, "#4CAF50");
        assert_eq!(geofence.priority, 1);
        assert!(geofence.is_active);
        assert_eq!(geofence.shape, GeofenceShape::Circle);
        assert_eq!(geofence.alert_settings.auto_sos_delay, 300);
        assert_eq!(geofence.alert_settings.sensitivity, Sensitivity::Medium);
        assert_eq!(geofence.ai_optimization.improvement_potential, Sensitivity::Low);
    }

    #[test]
    fn test_geofence_field_names() {
        let json = serde_json::to_value(Geofence::default()).unwrap();
        assert_eq!(json["alertSettings"]["autoSOS"], false);
        assert_eq!(json["alertSettings"]["autoSOSDelay"], 300);
        assert_eq!(json["createdBy"], "user");
        assert_eq!(json["isActive"], true);
    }

    #[test]
    fn test_create_request_bounds() {
        assert!(request(20.0, 1).validate().is_ok());
        assert!(request(1000.0, 5).validate().is_ok());
        assert!(request(10.0, 1).validate().is_err());
        assert!(request(1500.0, 1).validate().is_err());
        assert!(request(100.0, 0).validate().is_err());
        assert!(request(100.0, 6).validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_bad_center() {
        let request: CreateGeofenceRequest = serde_json::from_value(serde_json::json!({
            "petId": "p1",
            "name": "Park",
            "center": { "latitude": 95.0, "longitude": 0.0 },
            "radius": 100.0
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_into_geofence() {
        let geofence = request(150.0, 3).into_geofence("u1");
        assert_eq!(geofence.user_id, "u1");
        assert_eq!(geofence.priority, 3);
        assert_eq!(geofence.color, "#4CAF50");
        assert_eq!(geofence.center, Some(GeoPoint::new(40.7128, -74.006)));
        assert!(geofence.geofence_id.is_empty());
    }
}
