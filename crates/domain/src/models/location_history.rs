//! Location fixes reported by trackers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Document, GeoPoint};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationHistory {
    pub history_id: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub coordinates: Option<GeoPoint>,
    /// Meters.
    pub accuracy: f64,
    pub zone: String,
    /// One of [`super::constants::LOCATION_SOURCES`].
    pub source: String,
    /// km/h
    pub speed: Option<f64>,
    /// Degrees.
    pub heading: Option<f64>,
    /// high, medium or low
    pub confidence: String,
    pub battery_level: Option<i32>,
    /// routine, unusual or emergency
    pub significance: String,
    pub weather: LocationWeather,
    /// Seconds spent at this location.
    pub duration: i64,
    pub notes: Option<String>,
}

impl Default for LocationHistory {
    fn default() -> Self {
        Self {
            history_id: String::new(),
            timestamp: None,
            coordinates: None,
            accuracy: 0.0,
            zone: String::new(),
            source: String::new(),
            speed: None,
            heading: None,
            confidence: "low".to_string(),
            battery_level: None,
            significance: "routine".to_string(),
            weather: LocationWeather::default(),
            duration: 0,
            notes: None,
        }
    }
}

impl Document for LocationHistory {
    const COLLECTION: &'static str = "location_history";

    fn document_id(&self) -> &str {
        &self.history_id
    }

    fn set_document_id(&mut self, id: String) {
        self.history_id = id;
    }

    fn stamp(&mut self, now: DateTime<Utc>, created: bool) {
        if created && self.timestamp.is_none() {
            self.timestamp = Some(now);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationWeather {
    pub condition: String,
    pub temperature: f64,
    pub humidity: i32,
}
