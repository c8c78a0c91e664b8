//! String values of the taxonomies stored on documents.
//!
//! Documents that are stored but never interpreted by the backend keep these
//! fields as plain strings; the constants document the accepted values.

pub const TIER_TAG: &str = "TAG";
pub const TIER_ACTIVE: &str = "ACTIVE";
pub const TIER_SENSE: &str = "SENSE";

pub const DEVICE_TAG: &str = "TAG";
pub const DEVICE_ACTIVE: &str = "ACTIVE";
pub const DEVICE_SENSE: &str = "SENSE";

pub const PET_TYPE_DOG: &str = "Dog";
pub const PET_TYPE_CAT: &str = "Cat";
pub const PET_TYPE_OTHER: &str = "Other";

pub const ACTIVITY_WALK: &str = "walk";
pub const ACTIVITY_RUN: &str = "run";
pub const ACTIVITY_PLAY: &str = "play";
pub const ACTIVITY_REST: &str = "rest";
pub const ACTIVITY_SLEEP: &str = "sleep";
pub const ACTIVITY_TRAINING: &str = "training";

pub const ACTIVITY_TYPES: [&str; 6] = [
    ACTIVITY_WALK,
    ACTIVITY_RUN,
    ACTIVITY_PLAY,
    ACTIVITY_REST,
    ACTIVITY_SLEEP,
    ACTIVITY_TRAINING,
];

pub const ALERT_CATEGORY_GEOFENCE: &str = "geofence";
pub const ALERT_CATEGORY_DEVICE: &str = "device";
pub const ALERT_CATEGORY_ACTIVITY: &str = "activity";
pub const ALERT_CATEGORY_EMERGENCY: &str = "emergency";
pub const ALERT_CATEGORY_HEALTH: &str = "health";

pub const ALERT_CATEGORIES: [&str; 5] = [
    ALERT_CATEGORY_GEOFENCE,
    ALERT_CATEGORY_DEVICE,
    ALERT_CATEGORY_ACTIVITY,
    ALERT_CATEGORY_EMERGENCY,
    ALERT_CATEGORY_HEALTH,
];

pub const ALERT_SEVERITY_LOW: &str = "low";
pub const ALERT_SEVERITY_MEDIUM: &str = "medium";
pub const ALERT_SEVERITY_HIGH: &str = "high";
pub const ALERT_SEVERITY_CRITICAL: &str = "critical";

pub const ALERT_SEVERITIES: [&str; 4] = [
    ALERT_SEVERITY_LOW,
    ALERT_SEVERITY_MEDIUM,
    ALERT_SEVERITY_HIGH,
    ALERT_SEVERITY_CRITICAL,
];

pub const FAMILY_ROLE_OWNER: &str = "owner";
pub const FAMILY_ROLE_FAMILY: &str = "family";
pub const FAMILY_ROLE_EMERGENCY: &str = "emergency";
pub const FAMILY_ROLE_VET: &str = "vet";
pub const FAMILY_ROLE_TRAINER: &str = "trainer";

pub const PERMISSION_VIEW: &str = "view";
pub const PERMISSION_ALERTS: &str = "alerts";
pub const PERMISSION_EMERGENCY: &str = "emergency";
pub const PERMISSION_SETTINGS: &str = "settings";
pub const PERMISSION_MANAGE_FAMILY: &str = "manage_family";

pub const LOCATION_SOURCE_GPS: &str = "gps";
pub const LOCATION_SOURCE_WIFI: &str = "wifi";
pub const LOCATION_SOURCE_CELLULAR: &str = "cellular";
pub const LOCATION_SOURCE_BLE: &str = "ble";

pub const LOCATION_SOURCES: [&str; 4] = [
    LOCATION_SOURCE_GPS,
    LOCATION_SOURCE_WIFI,
    LOCATION_SOURCE_CELLULAR,
    LOCATION_SOURCE_BLE,
];

pub const CONFIDENCE_HIGH: &str = "high";
pub const CONFIDENCE_MEDIUM: &str = "medium";
pub const CONFIDENCE_LOW: &str = "low";
