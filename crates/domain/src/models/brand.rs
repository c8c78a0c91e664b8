//! TruFurrs brand palette and copy.

pub const APP_NAME: &str = "TruFurrs";

pub const PRIMARY_DARK_GREEN: &str = "#00291B";
pub const PRIMARY_CHARCOAL_GRAY: &str = "#333333";
pub const SECONDARY_MUSTARD_GOLD: &str = "#D3AF37";
pub const ACCENT_GOLD: &str = "#D4AF37";
pub const ACCENT_SILVER: &str = "#A8A8A8";

pub const WHITE: &str = "#FFFFFF";
pub const BLACK: &str = "#000000";
pub const ERROR_RED: &str = "#F44336";
pub const SUCCESS_GREEN: &str = "#4CAF50";
pub const WARNING_ORANGE: &str = "#FF9800";

pub const FONT_PRIMARY: &str = "Poppins";
pub const FONT_BACKUP: &str = "Inter";
pub const FONT_SYSTEM: &str = "Roboto";

// The helpers below take raw tier strings, matched case-insensitively, so
// they also work on values read straight from documents.

pub fn tier_primary_color(_tier: &str) -> &'static str {
    PRIMARY_DARK_GREEN
}

pub fn tier_accent_color(tier: &str) -> &'static str {
    match tier.to_ascii_uppercase().as_str() {
        "ACTIVE" => SECONDARY_MUSTARD_GOLD,
        "SENSE" => ACCENT_GOLD,
        _ => ACCENT_SILVER,
    }
}

pub fn tier_display_name(tier: &str) -> &'static str {
    match tier.to_ascii_uppercase().as_str() {
        "TAG" => "TruFurrs TAG",
        "ACTIVE" => "TruFurrs ACTIVE",
        "SENSE" => "TruFurrs SENSE",
        _ => APP_NAME,
    }
}

pub fn tier_tagline(tier: &str) -> &'static str {
    match tier.to_ascii_uppercase().as_str() {
        "TAG" => "Find Your Pet",
        "ACTIVE" => "Smart Pet Tracking",
        "SENSE" => "Complete Pet Wellness",
        _ => "Pet Safety & Wellness",
    }
}
