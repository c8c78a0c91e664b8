//! Activity sessions recorded by ACTIVE and SENSE trackers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Document, GeoPoint};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Activity {
    pub activity_id: String,
    pub pet_id: String,
    pub device_id: String,
    pub timestamp: Option<DateTime<Utc>>,
    /// One of [`super::constants::ACTIVITY_TYPES`].
    pub activity_type: String,
    pub sub_type: String,
    /// Seconds.
    pub duration: i64,
    pub steps: Option<i32>,
    /// Kilometers.
    pub distance: Option<f64>,
    pub calories: Option<i32>,
    /// low, moderate, high or intense
    pub intensity: String,
    pub movement_data: MovementData,
    pub location: ActivityLocation,
    /// 0-100
    pub quality_score: i32,
    /// 0-100
    pub confidence: i32,
    /// 0-1
    pub data_completeness: f64,
    pub anomalies: Vec<String>,
    pub social_activity: SocialActivity,
    pub health_metrics: ActivityHealthMetrics,
    pub contributes_to_goals: Vec<String>,
    pub achievements: Vec<String>,
    pub goal_progress: GoalProgress,
    pub analysis: ActivityAnalysis,
}

impl Default for Activity {
    fn default() -> Self {
        Self {
            activity_id: String::new(),
            pet_id: String::new(),
            device_id: String::new(),
            timestamp: None,
            activity_type: String::new(),
            sub_type: String::new(),
            duration: 0,
            steps: None,
            distance: None,
            calories: None,
            intensity: "moderate".to_string(),
            movement_data: MovementData::default(),
            location: ActivityLocation::default(),
            quality_score: 0,
            confidence: 0,
            data_completeness: 0.0,
            anomalies: Vec::new(),
            social_activity: SocialActivity::default(),
            health_metrics: ActivityHealthMetrics::default(),
            contributes_to_goals: Vec::new(),
            achievements: Vec::new(),
            goal_progress: GoalProgress::default(),
            analysis: ActivityAnalysis::default(),
        }
    }
}

impl Document for Activity {
    const COLLECTION: &'static str = "activities";

    fn document_id(&self) -> &str {
        &self.activity_id
    }

    fn set_document_id(&mut self, id: String) {
        self.activity_id = id;
    }

    fn stamp(&mut self, now: DateTime<Utc>, created: bool) {
        if created && self.timestamp.is_none() {
            self.timestamp = Some(now);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MovementData {
    /// km/h
    pub average_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_speed: Option<f64>,
    /// Meters.
    pub elevation_gain: Option<f64>,
    pub elevation_loss: Option<f64>,
    pub route_coordinates: Vec<GeoPoint>,
    /// regular, erratic, excited or lethargic
    pub movement_pattern: String,
    pub pause_count: i32,
    /// Seconds.
    pub average_pause_duration: i64,
}

impl Default for MovementData {
    fn default() -> Self {
        Self {
            average_speed: None,
            max_speed: None,
            min_speed: None,
            elevation_gain: None,
            elevation_loss: None,
            route_coordinates: Vec::new(),
            movement_pattern: "regular".to_string(),
            pause_count: 0,
            average_pause_duration: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityLocation {
    pub start_coordinates: Option<GeoPoint>,
    pub end_coordinates: Option<GeoPoint>,
    pub primary_zone: Option<String>,
    pub zones_visited: Vec<String>,
    /// urban, park, beach, trail or mixed
    pub terrain_type: String,
    pub weather: ActivityWeather,
}

impl Default for ActivityLocation {
    fn default() -> Self {
        Self {
            start_coordinates: None,
            end_coordinates: None,
            primary_zone: None,
            zones_visited: Vec::new(),
            terrain_type: "mixed".to_string(),
            weather: ActivityWeather::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityWeather {
    pub condition: String,
    /// Celsius.
    pub temperature: f64,
    pub humidity: i32,
    pub wind_speed: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialActivity {
    pub with_family: bool,
    pub family_members: Vec<String>,
    pub with_other_pets: bool,
    pub other_pets: Vec<String>,
    pub with_other_dogs: bool,
    pub interactions: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityHealthMetrics {
    /// SENSE only.
    pub resting_heart_rate: Option<i32>,
    /// SENSE only.
    pub average_heart_rate: Option<i32>,
    pub stress_level: String,
    pub fatigue_level: String,
    pub recovery_time: i64,
    pub hydration_needed: bool,
}

impl Default for ActivityHealthMetrics {
    fn default() -> Self {
        Self {
            resting_heart_rate: None,
            average_heart_rate: None,
            stress_level: "low".to_string(),
            fatigue_level: "none".to_string(),
            recovery_time: 0,
            hydration_needed: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalProgress {
    pub steps_contribution: i32,
    pub duration_contribution: i64,
    pub streak_maintained: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityAnalysis {
    /// normal, unusual or concerning
    pub behavior_classification: String,
    pub energy_level: String,
    pub enjoyment_level: f64,
    pub optimal_activity: bool,
    pub recommendations: Vec<String>,
    pub next_activity_suggestion: String,
}

impl Default for ActivityAnalysis {
    fn default() -> Self {
        Self {
            behavior_classification: "normal".to_string(),
            energy_level: "medium".to_string(),
            enjoyment_level: 0.0,
            optimal_activity: false,
            recommendations: Vec::new(),
            next_activity_suggestion: String::new(),
        }
    }
}
