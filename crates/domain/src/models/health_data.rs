//! SENSE-tier health readings.
//!
//! Every metric arrives already encrypted by the tracker and is stored as
//! opaque ciphertext.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Document;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HealthData {
    pub health_id: String,
    pub pet_id: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub heart_rate: Option<String>,
    pub temperature: Option<String>,
    pub respiratory_rate: Option<String>,
    pub stress_level: Option<String>,
    pub sleep: Option<String>,
    pub seizure: Option<String>,
}

impl Document for HealthData {
    const COLLECTION: &'static str = "health_data";

    fn document_id(&self) -> &str {
        &self.health_id
    }

    fn set_document_id(&mut self, id: String) {
        self.health_id = id;
    }

    fn stamp(&mut self, now: DateTime<Utc>, created: bool) {
        if created && self.timestamp.is_none() {
            self.timestamp = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_readings_default_to_none() {
        let reading: HealthData = serde_json::from_value(serde_json::json!({
            "healthId": "h1",
            "petId": "p1",
            "heartRate": "enc:9f2c"
        }))
        .unwrap();

        assert_eq!(reading.heart_rate.as_deref(), Some("enc:9f2c"));
        assert!(reading.temperature.is_none());
        assert!(reading.timestamp.is_none());
    }

    #[test]
    fn test_stamp_keeps_device_timestamp() {
        let recorded = Utc::now() - chrono::Duration::minutes(5);
        let mut reading = HealthData {
            timestamp: Some(recorded),
            ..Default::default()
        };
        reading.stamp(Utc::now(), true);
        assert_eq!(reading.timestamp, Some(recorded));
    }
}
