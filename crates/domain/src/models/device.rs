//! Tracker device document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::Document;
use super::tier::{Tier, TierConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    #[default]
    Active,
    Inactive,
    Lost,
    Maintenance,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Active => "active",
            DeviceStatus::Inactive => "inactive",
            DeviceStatus::Lost => "lost",
            DeviceStatus::Maintenance => "maintenance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryHealth {
    Excellent,
    #[default]
    Good,
    Fair,
    Poor,
}

/// A paired tracker stored in the `devices` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Device {
    pub device_id: String,
    pub user_id: String,
    pub pet_id: String,
    pub physical_device_id: String,
    /// Determined during pairing.
    pub device_type: Tier,
    pub serial_number: String,
    pub firmware_version: String,
    pub hardware_version: String,
    pub manufacturing_date: String,
    pub status: DeviceStatus,
    pub last_sync: Option<DateTime<Utc>>,
    pub battery_level: i32,
    pub battery_health: BatteryHealth,
    /// Days remaining.
    pub estimated_battery_life: i32,
    pub connectivity: ConnectivityStatus,
    pub settings: DeviceSettings,
    pub diagnostics: DeviceDiagnostics,
    pub auth_token: String,
    pub last_token_refresh: Option<DateTime<Utc>>,
    pub security_version: String,
    pub encryption_enabled: bool,
}

impl Default for Device {
    fn default() -> Self {
        Self {
            device_id: String::new(),
            user_id: String::new(),
            pet_id: String::new(),
            physical_device_id: String::new(),
            device_type: Tier::Tag,
            serial_number: String::new(),
            firmware_version: String::new(),
            hardware_version: String::new(),
            manufacturing_date: String::new(),
            status: DeviceStatus::Active,
            last_sync: None,
            battery_level: 0,
            battery_health: BatteryHealth::Good,
            estimated_battery_life: 0,
            connectivity: ConnectivityStatus::default(),
            settings: DeviceSettings::default(),
            diagnostics: DeviceDiagnostics::default(),
            auth_token: String::new(),
            last_token_refresh: None,
            security_version: "v1.0".to_string(),
            encryption_enabled: true,
        }
    }
}

impl Document for Device {
    const COLLECTION: &'static str = "devices";

    fn document_id(&self) -> &str {
        &self.device_id
    }

    fn set_document_id(&mut self, id: String) {
        self.device_id = id;
    }

    fn stamp(&mut self, now: DateTime<Utc>, _created: bool) {
        self.last_sync = Some(now);
    }
}

/// The auth token is a device credential and never leaves the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceResponse {
    #[serde(flatten)]
    pub device: Device,
}

impl From<Device> for DeviceResponse {
    fn from(mut device: Device) -> Self {
        device.auth_token = String::new();
        Self { device }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectivityStatus {
    pub gps: GpsStatus,
    pub cellular: CellularStatus,
    pub wifi: WifiStatus,
    pub ble: BleStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GpsStatus {
    pub enabled: bool,
    pub last_fix: Option<DateTime<Utc>>,
    /// Meters.
    pub accuracy: f64,
    pub satellite_count: i32,
}

impl Default for GpsStatus {
    fn default() -> Self {
        Self {
            enabled: true,
            last_fix: None,
            accuracy: 0.0,
            satellite_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CellularStatus {
    pub enabled: bool,
    /// 0-100.
    pub signal_strength: i32,
    pub carrier: String,
    /// MB this month.
    pub data_usage: i32,
    pub last_connection: Option<DateTime<Utc>>,
}

impl Default for CellularStatus {
    fn default() -> Self {
        Self {
            enabled: true,
            signal_strength: 0,
            carrier: String::new(),
            data_usage: 0,
            last_connection: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WifiStatus {
    pub enabled: bool,
    pub connected: bool,
    pub ssid: Option<String>,
    pub signal_strength: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BleStatus {
    pub enabled: bool,
    /// Effective range in meters.
    pub range: i32,
    pub last_connection: Option<DateTime<Utc>>,
}

impl Default for BleStatus {
    fn default() -> Self {
        Self {
            enabled: true,
            range: 25,
            last_connection: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceSettings {
    /// Seconds.
    pub gps_refresh_rate: i32,
    pub sos_enabled: bool,
    pub led_enabled: bool,
    pub sound_enabled: bool,
    pub power_save_mode: bool,
    pub geofence_monitoring: bool,
    pub activity_tracking: bool,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            gps_refresh_rate: 300,
            sos_enabled: true,
            led_enabled: true,
            sound_enabled: true,
            power_save_mode: false,
            geofence_monitoring: false,
            activity_tracking: false,
        }
    }
}

impl DeviceSettings {
    /// Defaults pushed to a device of the given tier when it is paired.
    pub fn for_tier(tier: Tier) -> Self {
        let config = TierConfig::for_tier(tier);
        Self {
            gps_refresh_rate: config.gps_refresh_rate_secs(),
            geofence_monitoring: config.is_geofencing_enabled,
            activity_tracking: config.is_activity_tracking_enabled,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceDiagnostics {
    /// Hours since activation.
    pub total_uptime: i32,
    pub crash_count: i32,
    pub last_maintenance: Option<DateTime<Utc>>,
    /// Celsius.
    pub temperature: f64,
    pub issues: Vec<String>,
    /// 0-100.
    pub performance_score: i32,
    /// 0-1.
    pub data_integrity: f64,
}

impl Default for DeviceDiagnostics {
    fn default() -> Self {
        Self {
            total_uptime: 0,
            crash_count: 0,
            last_maintenance: None,
            temperature: 0.0,
            issues: Vec::new(),
            performance_score: 100,
            data_integrity: 1.0,
        }
    }
}

/// Request payload for pairing a new tracker with a pet.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PairDeviceRequest {
    #[validate(length(min = 1, max = 128, message = "Pet ID is required"))]
    pub pet_id: String,

    #[validate(length(min = 1, max = 128, message = "Physical device ID is required"))]
    pub physical_device_id: String,

    /// Raw type reported by the hardware; unknown values pair as TAG.
    #[validate(length(min = 1, max = 32, message = "Device type is required"))]
    pub device_type: String,

    #[serde(default)]
    #[validate(length(max = 64, message = "Serial number must be at most 64 characters"))]
    pub serial_number: String,

    #[serde(default)]
    pub firmware_version: String,

    #[serde(default)]
    pub hardware_version: String,

    #[serde(default)]
    pub manufacturing_date: String,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_battery_level"))]
    pub battery_level: i32,
}

/// Request payload for a device status report.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeviceStatusRequest {
    pub status: DeviceStatus,

    #[validate(custom(function = "shared::validation::validate_battery_level"))]
    pub battery_level: i32,
}

/// Request payload for replacing device settings.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeviceRequest {
    pub settings: Option<DeviceSettings>,

    #[validate(length(max = 64, message = "Firmware version must be at most 64 characters"))]
    pub firmware_version: Option<String>,

    pub battery_health: Option<BatteryHealth>,

    #[validate(range(min = 0, max = 3650, message = "Estimated battery life must be 0-3650 days"))]
    pub estimated_battery_life: Option<i32>,
}

impl UpdateDeviceRequest {
    pub fn apply(self, device: &mut Device) {
        if let Some(settings) = self.settings {
            device.settings = settings;
        }
        if let Some(firmware) = self.firmware_version {
            device.firmware_version = firmware;
        }
        if let Some(health) = self.battery_health {
            device.battery_health = health;
        }
        if let Some(days) = self.estimated_battery_life {
            device.estimated_battery_life = days;
        }
    }
}
