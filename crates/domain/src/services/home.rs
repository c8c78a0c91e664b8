//! Home screen content for a tier.

use serde::Serialize;

use crate::models::{Tier, TierConfig};

const FULL_FEATURES: &str = "Features: GPS Tracking, Geofencing, Activity Monitoring, Smart Alerts";
const BASIC_FEATURES: &str = "Features: Basic GPS Tracking, Find My Pet";

/// Bottom navigation variant shown on the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMenu {
    Tag,
    Active,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSummary {
    pub tier: Tier,
    pub welcome_text: String,
    pub tier_info: String,
    pub features_text: String,
    pub navigation_menu: NavigationMenu,
    pub tagline: String,
    pub primary_color: String,
    pub accent_color: String,
    pub map_style: String,
}

impl HomeSummary {
    pub fn for_tier(tier: Tier) -> Self {
        let config = TierConfig::for_tier(tier);
        let (features_text, navigation_menu) = if config.is_geofencing_enabled {
            (FULL_FEATURES, NavigationMenu::Active)
        } else {
            (BASIC_FEATURES, NavigationMenu::Tag)
        };

        Self {
            tier,
            welcome_text: format!("Welcome to {}", config.app_title),
            tier_info: format!("Current tier: {}", tier),
            features_text: features_text.to_string(),
            navigation_menu,
            tagline: config.tagline.to_string(),
            primary_color: config.primary_color.to_string(),
            accent_color: config.accent_color.to_string(),
            map_style: config.map_style.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_home() {
        let home = HomeSummary::for_tier(Tier::Tag);
        assert_eq!(home.welcome_text, "Welcome to TruFurrs TAG");
        assert_eq!(home.tier_info, "Current tier: TAG");
        assert_eq!(home.features_text, BASIC_FEATURES);
        assert_eq!(home.navigation_menu, NavigationMenu::Tag);
    }

    #[test]
    fn test_active_and_sense_home() {
        let active = HomeSummary::for_tier(Tier::Active);
        assert_eq!(active.welcome_text, "Welcome to TruFurrs ACTIVE");
        assert_eq!(active.features_text, FULL_FEATURES);
        assert_eq!(active.navigation_menu, NavigationMenu::Active);

        let sense = HomeSummary::for_tier(Tier::Sense);
        assert_eq!(sense.tier_info, "Current tier: SENSE");
        assert_eq!(sense.navigation_menu, NavigationMenu::Active);
    }
}
