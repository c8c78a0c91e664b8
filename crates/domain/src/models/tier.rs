//! Product tiers and their feature limits.
//!
//! A [`Tier`] is the device edition a user has paired. Everything the client
//! toggles per tier (feature flags, limits, map style, branding) is a pure
//! lookup on [`TierConfig`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::brand;

/// Device edition that controls available features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    #[default]
    Tag,
    Active,
    Sense,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Tag, Tier::Active, Tier::Sense];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Tag => "TAG",
            Tier::Active => "ACTIVE",
            Tier::Sense => "SENSE",
        }
    }

    /// Parses a tier name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TAG" => Some(Tier::Tag),
            "ACTIVE" => Some(Tier::Active),
            "SENSE" => Some(Tier::Sense),
            _ => None,
        }
    }

    /// Maps the device type reported during pairing to a tier.
    /// Unrecognized device types fall back to TAG.
    pub fn from_device_type(device_type: &str) -> Self {
        Self::parse(device_type).unwrap_or_default()
    }

    pub fn config(self) -> TierConfig {
        TierConfig::for_tier(self)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const TAG_FEATURES: &[&str] = &["basic_tracking", "find_my_pet", "battery_alerts"];
const ACTIVE_FEATURES: &[&str] = &[
    "real_time_tracking",
    "geofencing",
    "activity_monitoring",
    "smart_alerts",
    "family_sharing",
];
const SENSE_FEATURES: &[&str] = &[
    "real_time_tracking",
    "geofencing",
    "activity_monitoring",
    "smart_alerts",
    "family_sharing",
    "health_monitoring",
    "vet_integration",
];

/// Feature flags, limits and theming for one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierConfig {
    pub tier: Tier,
    pub is_geofencing_enabled: bool,
    pub is_activity_tracking_enabled: bool,
    pub is_smart_alerts_enabled: bool,
    pub is_family_sharing_enabled: bool,
    pub is_health_monitoring_enabled: bool,
    pub is_vet_integration_enabled: bool,
    pub is_offline_maps_enabled: bool,
    pub max_pets: usize,
    /// Location refresh interval in milliseconds.
    pub gps_refresh_rate: u64,
    pub max_geofence_zones: usize,
    pub map_style: &'static str,
    pub app_title: &'static str,
    pub tagline: &'static str,
    pub primary_color: &'static str,
    pub accent_color: &'static str,
    pub features: &'static [&'static str],
}

impl TierConfig {
    pub fn for_tier(tier: Tier) -> Self {
        let premium = tier != Tier::Tag;
        let sense = tier == Tier::Sense;

        let (max_pets, gps_refresh_rate, max_geofence_zones, map_style, features) = match tier {
            Tier::Tag => (1, 300_000, 0, "mapbox://styles/mapbox/light-v11", TAG_FEATURES),
            Tier::Active => (3, 60_000, 5, "mapbox://styles/mapbox/streets-v12", ACTIVE_FEATURES),
            Tier::Sense => (5, 30_000, 10, "mapbox://styles/mapbox/outdoors-v12", SENSE_FEATURES),
        };

        Self {
            tier,
            is_geofencing_enabled: premium,
            is_activity_tracking_enabled: premium,
            is_smart_alerts_enabled: premium,
            is_family_sharing_enabled: premium,
            is_health_monitoring_enabled: sense,
            is_vet_integration_enabled: sense,
            is_offline_maps_enabled: premium,
            max_pets,
            gps_refresh_rate,
            max_geofence_zones,
            map_style,
            app_title: brand::tier_display_name(tier.as_str()),
            tagline: brand::tier_tagline(tier.as_str()),
            primary_color: brand::tier_primary_color(tier.as_str()),
            accent_color: brand::tier_accent_color(tier.as_str()),
            features,
        }
    }

    /// Location refresh interval in whole seconds, as stored on devices.
    pub fn gps_refresh_rate_secs(&self) -> i32 {
        (self.gps_refresh_rate / 1000) as i32
    }

    pub fn can_add_pet(&self, current_pets: usize) -> bool {
        current_pets < self.max_pets
    }

    pub fn can_add_geofence(&self, current_zones: usize) -> bool {
        self.is_geofencing_enabled && current_zones < self.max_geofence_zones
    }
}

impl Default for TierConfig {
    fn default() -> Self {
        Self::for_tier(Tier::default())
    }
}

/// The session's current tier, observable by every screen.
#[derive(Debug, Clone)]
pub struct TierHandle {
    tx: Arc<watch::Sender<Tier>>,
}

impl TierHandle {
    pub fn new(initial: Tier) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> Tier {
        *self.tx.borrow()
    }

    pub fn config(&self) -> TierConfig {
        self.current().config()
    }

    pub fn set(&self, tier: Tier) {
        self.tx.send_replace(tier);
    }

    /// Applies a stored tier or a paired device type.
    pub fn update_from_device(&self, device_type: &str) -> Tier {
        let tier = Tier::from_device_type(device_type);
        self.set(tier);
        tier
    }

    pub fn subscribe(&self) -> watch::Receiver<Tier> {
        self.tx.subscribe()
    }
}

impl Default for TierHandle {
    fn default() -> Self {
        Self::new(Tier::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_lookups() {
        let config = TierConfig::for_tier(Tier::Tag);
        assert_eq!(config.max_pets, 1);
        assert!(!config.is_geofencing_enabled);
        assert!(!config.is_activity_tracking_enabled);
        assert!(!config.is_smart_alerts_enabled);
        assert!(!config.is_family_sharing_enabled);
        assert!(!config.is_offline_maps_enabled);
        assert!(!config.is_health_monitoring_enabled);
        assert_eq!(config.gps_refresh_rate, 300_000);
        assert_eq!(config.max_geofence_zones, 0);
        assert_eq!(config.map_style, "mapbox://styles/mapbox/light-v11");
        assert_eq!(config.accent_color, "#A8A8A8");
    }

    #[test]
    fn test_active_lookups() {
        let config = TierConfig::for_tier(Tier::Active);
        assert_eq!(config.max_pets, 3);
        assert!(config.is_geofencing_enabled);
        assert!(config.is_family_sharing_enabled);
        assert!(!config.is_health_monitoring_enabled);
        assert!(!config.is_vet_integration_enabled);
        assert_eq!(config.gps_refresh_rate, 60_000);
        assert_eq!(config.max_geofence_zones, 5);
        assert_eq!(config.map_style, "mapbox://styles/mapbox/streets-v12");
        assert_eq!(config.accent_color, "#D3AF37");
    }

    #[test]
    fn test_sense_lookups() {
        let config = TierConfig::for_tier(Tier::Sense);
        assert_eq!(config.max_pets, 5);
        assert_eq!(config.max_geofence_zones, 10);
        assert!(config.is_health_monitoring_enabled);
        assert!(config.is_vet_integration_enabled);
        assert!(config.is_geofencing_enabled);
        assert_eq!(config.gps_refresh_rate, 30_000);
        assert_eq!(config.accent_color, "#D4AF37");
        assert!(config.features.contains(&"vet_integration"));
        assert!(config.features.contains(&"geofencing"));
    }

    #[test]
    fn test_primary_color_is_shared() {
        for tier in Tier::ALL {
            assert_eq!(tier.config().primary_color, "#00291B");
        }
    }

    #[test]
    fn test_titles_and_taglines() {
        assert_eq!(Tier::Tag.config().app_title, "TruFurrs TAG");
        assert_eq!(Tier::Active.config().tagline, "Smart Pet Tracking");
        assert_eq!(Tier::Sense.config().tagline, "Complete Pet Wellness");
    }

    #[test]
    fn test_from_device_type() {
        assert_eq!(Tier::from_device_type("ACTIVE"), Tier::Active);
        assert_eq!(Tier::from_device_type("sense"), Tier::Sense);
        assert_eq!(Tier::from_device_type(" Tag "), Tier::Tag);
        assert_eq!(Tier::from_device_type("COLLAR_X"), Tier::Tag);
        assert_eq!(Tier::from_device_type(""), Tier::Tag);
    }

    #[test]
    fn test_limits() {
        let tag = Tier::Tag.config();
        assert!(tag.can_add_pet(0));
        assert!(!tag.can_add_pet(1));
        assert!(!tag.can_add_geofence(0));

        let active = Tier::Active.config();
        assert!(active.can_add_geofence(4));
        assert!(!active.can_add_geofence(5));
        assert_eq!(active.gps_refresh_rate_secs(), 60);
    }

    #[test]
    fn test_tier_serialization() {
        assert_eq!(serde_json::to_string(&Tier::Active).unwrap(), "\"ACTIVE\"");
        let tier: Tier = serde_json::from_str("\"SENSE\"").unwrap();
        assert_eq!(tier, Tier::Sense);
    }

    #[test]
    fn test_tier_handle_publishes_changes() {
        let handle = TierHandle::default();
        let rx = handle.subscribe();
        assert_eq!(handle.current(), Tier::Tag);

        assert_eq!(handle.update_from_device("active"), Tier::Active);
        assert_eq!(*rx.borrow(), Tier::Active);
        assert!(handle.config().is_geofencing_enabled);

        handle.update_from_device("unknown");
        assert_eq!(*rx.borrow(), Tier::Tag);
    }
}
