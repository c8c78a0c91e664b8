//! Pet document and request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::{Document, GeoPoint};
use super::tier::Tier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PetType {
    Dog,
    Cat,
    #[default]
    Other,
}

impl PetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetType::Dog => "Dog",
            PetType::Cat => "Cat",
            PetType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedicalSeverity {
    #[default]
    Routine,
    Minor,
    Major,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    #[default]
    Low,
}

/// Low/moderate/high scale used for activity and energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    #[default]
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    #[default]
    Normal,
    Concern,
    Alert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialBehavior {
    #[default]
    Friendly,
    Cautious,
    Aggressive,
}

/// Pet profile stored in the `pets` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pet {
    pub pet_id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub breed: String,
    pub gender: Gender,
    /// `YYYY-MM-DD`
    pub birthday: String,
    /// Kilograms.
    pub weight: Option<f64>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub microchip_id: Option<String>,
    pub registration_number: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Set once a device is paired.
    pub current_device: Option<DeviceInfo>,
    pub medical_history: Vec<MedicalRecord>,
    pub emergency_contacts: Vec<EmergencyContact>,
    pub current_status: Option<PetStatus>,
    pub activity_summary: Option<ActivitySummary>,
    pub behavior_profile: Option<BehaviorProfile>,
}

impl Document for Pet {
    const COLLECTION: &'static str = "pets";

    fn document_id(&self) -> &str {
        &self.pet_id
    }

    fn set_document_id(&mut self, id: String) {
        self.pet_id = id;
    }

    fn stamp(&mut self, now: DateTime<Utc>, created: bool) {
        if created && self.created_at.is_none() {
            self.created_at = Some(now);
        }
        self.updated_at = Some(now);
    }
}

/// Device currently attached to a pet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceInfo {
    #[validate(length(min = 1, message = "Device ID is required"))]
    pub device_id: String,
    pub device_type: Tier,
    pub paired_at: Option<DateTime<Utc>>,
    #[validate(custom(function = "shared::validation::validate_battery_level"))]
    pub battery_level: i32,
    pub last_seen: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MedicalRecord {
    pub date: String,
    pub condition: String,
    pub notes: String,
    pub vet_id: Option<String>,
    pub severity: MedicalSeverity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct EmergencyContact {
    #[validate(length(min = 1, max = 100, message = "Contact name is required"))]
    pub name: String,
    #[validate(custom(function = "shared::validation::validate_phone"))]
    pub phone: String,
    /// Owner, Vet, Family or Friend.
    pub relationship: String,
    pub is_primary: bool,
    pub available24h: bool,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PetStatus {
    pub location: Option<LocationStatus>,
    pub activity: Option<ActivityStatus>,
    pub health: Option<HealthStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationStatus {
    pub coordinates: Option<GeoPoint>,
    pub accuracy: f64,
    pub zone: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityStatus {
    pub level: ActivityLevel,
    pub last_movement: Option<DateTime<Utc>>,
    pub today_steps: i32,
    pub streak: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: HealthState,
    pub last_checkup: Option<DateTime<Utc>>,
    pub next_checkup: Option<DateTime<Utc>>,
}

/// Cached daily roll-up, populated for tiers with activity tracking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivitySummary {
    pub last_updated: Option<DateTime<Utc>>,
    pub today: DailyActivity,
    pub this_week: WeeklyActivity,
    pub streaks: ActivityStreaks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyActivity {
    pub steps: i32,
    pub active_minutes: i32,
    /// Kilometers.
    pub distance: f64,
    pub calories: i32,
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WeeklyActivity {
    pub average_steps: i32,
    pub total_distance: f64,
    pub active_days: i32,
    pub goal_achieved: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityStreaks {
    pub current: i32,
    pub longest: i32,
    pub this_month: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BehaviorProfile {
    /// Hour ranges such as `08:00-09:00`.
    pub activity_peaks: Vec<String>,
    pub favorite_locations: Vec<String>,
    pub social_behavior: SocialBehavior,
    pub energy_level: ActivityLevel,
    /// 0 to 1.
    pub routine_strength: f64,
    pub last_analyzed: Option<DateTime<Utc>>,
}

impl Default for BehaviorProfile {
    fn default() -> Self {
        Self {
            activity_peaks: Vec::new(),
            favorite_locations: Vec::new(),
            social_behavior: SocialBehavior::Friendly,
            energy_level: ActivityLevel::Moderate,
            routine_strength: 0.0,
            last_analyzed: None,
        }
    }
}

/// Request payload for registering a pet.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    #[validate(custom(function = "shared::validation::validate_pet_name"))]
    pub name: String,

    #[serde(rename = "type")]
    pub pet_type: PetType,

    #[serde(default)]
    #[validate(length(max = 100, message = "Breed must be at most 100 characters"))]
    pub breed: String,

    #[serde(default)]
    pub gender: Gender,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_birthday"))]
    pub birthday: String,

    #[validate(range(min = 0.0, max = 200.0, message = "Weight must be between 0 and 200 kg"))]
    pub weight: Option<f64>,

    #[serde(rename = "photoURL")]
    #[validate(url(message = "Photo URL must be a valid URL"))]
    pub photo_url: Option<String>,

    #[validate(length(max = 64, message = "Microchip ID must be at most 64 characters"))]
    pub microchip_id: Option<String>,

    pub registration_number: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub emergency_contacts: Vec<EmergencyContact>,
}

impl CreatePetRequest {
    pub fn into_pet(self, user_id: &str) -> Pet {
        Pet {
            user_id: user_id.to_string(),
            name: self.name.trim().to_string(),
            pet_type: self.pet_type,
            breed: self.breed,
            gender: self.gender,
            birthday: self.birthday,
            weight: self.weight,
            photo_url: self.photo_url,
            microchip_id: self.microchip_id,
            registration_number: self.registration_number,
            emergency_contacts: self.emergency_contacts,
            ..Pet::default()
        }
    }
}

/// Request payload for editing a pet's profile. Absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetRequest {
    #[validate(custom(function = "shared::validation::validate_pet_name"))]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub pet_type: Option<PetType>,

    #[validate(length(max = 100, message = "Breed must be at most 100 characters"))]
    pub breed: Option<String>,

    pub gender: Option<Gender>,

    #[validate(custom(function = "shared::validation::validate_birthday"))]
    pub birthday: Option<String>,

    #[validate(range(min = 0.0, max = 200.0, message = "Weight must be between 0 and 200 kg"))]
    pub weight: Option<f64>,

    #[serde(rename = "photoURL")]
    #[validate(url(message = "Photo URL must be a valid URL"))]
    pub photo_url: Option<String>,

    pub microchip_id: Option<String>,

    pub registration_number: Option<String>,

    #[validate(nested)]
    pub emergency_contacts: Option<Vec<EmergencyContact>>,

    pub medical_history: Option<Vec<MedicalRecord>>,
}

impl UpdatePetRequest {
    pub fn apply(self, pet: &mut Pet) {
        if let Some(name) = self.name {
            pet.name = name.trim().to_string();
        }
        if let Some(pet_type) = self.pet_type {
            pet.pet_type = pet_type;
        }
        if let Some(breed) = self.breed {
            pet.breed = breed;
        }
        if let Some(gender) = self.gender {
            pet.gender = gender;
        }
        if let Some(birthday) = self.birthday {
            pet.birthday = birthday;
        }
        if self.weight.is_some() {
            pet.weight = self.weight;
        }
        if self.photo_url.is_some() {
            pet.photo_url = self.photo_url;
        }
        if self.microchip_id.is_some() {
            pet.microchip_id = self.microchip_id;
        }
        if self.registration_number.is_some() {
            pet.registration_number = self.registration_number;
        }
        if let Some(contacts) = self.emergency_contacts {
            pet.emergency_contacts = contacts;
        }
        if let Some(history) = self.medical_history {
            pet.medical_history = history;
        }
    }
}
