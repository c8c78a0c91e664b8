//! Field validators for account and tracking payloads.
//!
//! The account validators mirror the rules enforced by the mobile sign-up and
//! sign-in screens so that the server rejects exactly what the client would.

use chrono::NaiveDate;
use validator::ValidationError;

lazy_static::lazy_static! {
    /// Same pattern the Android client uses for e-mail addresses.
    static ref EMAIL_REGEX: regex::Regex = regex::Regex::new(
        r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$"
    )
    .unwrap();
    // Character classes are spelled out: `\d` and `\s` are Unicode-aware here
    // but ASCII-only on the client.
    static ref NAME_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-zA-Z \t\n\x0B\f\r]{2,50}$").unwrap();
    static ref PHONE_REGEX: regex::Regex = regex::Regex::new(r"^[+]?[1-9][0-9]{1,14}$").unwrap();
    static ref PASSWORD_CHARSET_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Za-z0-9@$!%*#?&]{8,}$").unwrap();
    static ref HEX_COLOR_REGEX: regex::Regex =
        regex::Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap();
}

/// Minimum password length accepted on sign-in.
pub const LOGIN_PASSWORD_MIN_LENGTH: usize = 6;

/// Geofence radius bounds in meters.
pub const GEOFENCE_MIN_RADIUS_METERS: f64 = 20.0;
pub const GEOFENCE_MAX_RADIUS_METERS: f64 = 1000.0;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Returns true when the e-mail address matches the client pattern.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Returns true for 2-50 ASCII letters and whitespace.
pub fn is_valid_name(name: &str) -> bool {
    NAME_REGEX.is_match(name)
}

/// Returns true for an empty phone number or an E.164-like number.
/// Spaces are ignored.
pub fn is_valid_phone(phone: &str) -> bool {
    if phone.is_empty() {
        return true;
    }
    let compact: String = phone.chars().filter(|c| *c != ' ').collect();
    PHONE_REGEX.is_match(&compact)
}

/// Returns true for at least 8 characters from the allowed set, containing
/// at least one letter and one digit.
pub fn is_valid_password(password: &str) -> bool {
    PASSWORD_CHARSET_REGEX.is_match(password)
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Validates an e-mail address entered on the sign-in or sign-up screen.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(error("email_required", "Email is required"));
    }
    if !is_valid_email(email) {
        return Err(error("email_invalid", "Please enter a valid email"));
    }
    Ok(())
}

/// Validates the full name entered on sign-up.
pub fn validate_full_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(error("name_required", "Full name is required"));
    }
    if name.chars().count() < 2 {
        return Err(error("name_too_short", "Name must be at least 2 characters"));
    }
    if !is_valid_name(name) {
        return Err(error("name_invalid", "Please enter a valid name"));
    }
    Ok(())
}

/// Validates a pet name; surrounding whitespace does not count.
pub fn validate_pet_name(name: &str) -> Result<(), ValidationError> {
    let length = name.trim().chars().count();
    if (1..=50).contains(&length) {
        Ok(())
    } else {
        Err(error("pet_name_length", "Pet name must be 1-50 characters"))
    }
}

/// Validates an optional phone number.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if is_valid_phone(phone.trim()) {
        Ok(())
    } else {
        Err(error("phone_invalid", "Please enter a valid phone number"))
    }
}

/// Validates the password chosen on sign-up or password reset.
pub fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(error("password_required", "Password is required"));
    }
    if !is_valid_password(password) {
        return Err(error(
            "password_weak",
            "Password must be at least 8 characters with letters and numbers",
        ));
    }
    Ok(())
}

/// Validates the password entered on sign-in.
pub fn validate_login_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(error("password_required", "Password is required"));
    }
    if password.chars().count() < LOGIN_PASSWORD_MIN_LENGTH {
        return Err(error(
            "password_too_short",
            "Password must be at least 6 characters",
        ));
    }
    Ok(())
}

/// Validates the confirmation field against the chosen password.
pub fn validate_password_confirmation(
    password: &str,
    confirmation: &str,
) -> Result<(), ValidationError> {
    if confirmation.is_empty() {
        return Err(error(
            "confirm_password_required",
            "Please confirm your password",
        ));
    }
    if password != confirmation {
        return Err(error("password_mismatch", "Passwords do not match"));
    }
    Ok(())
}

/// Validates that a latitude value is within valid range (-90 to 90).
pub fn validate_latitude(lat: f64) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        Err(error("latitude_range", "Latitude must be between -90 and 90"))
    }
}

/// Validates that a longitude value is within valid range (-180 to 180).
pub fn validate_longitude(lon: f64) -> Result<(), ValidationError> {
    if (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        Err(error(
            "longitude_range",
            "Longitude must be between -180 and 180",
        ))
    }
}

/// Validates that battery level is within valid range (0 to 100).
pub fn validate_battery_level(level: i32) -> Result<(), ValidationError> {
    if (0..=100).contains(&level) {
        Ok(())
    } else {
        Err(error(
            "battery_range",
            "Battery level must be between 0 and 100",
        ))
    }
}

pub fn validate_geofence_radius(radius: f64) -> Result<(), ValidationError> {
    if (GEOFENCE_MIN_RADIUS_METERS..=GEOFENCE_MAX_RADIUS_METERS).contains(&radius) {
        Ok(())
    } else {
        Err(error(
            "radius_range",
            "Radius must be between 20 and 1000 meters",
        ))
    }
}

pub fn validate_geofence_priority(priority: i32) -> Result<(), ValidationError> {
    if (1..=5).contains(&priority) {
        Ok(())
    } else {
        Err(error("priority_range", "Priority must be between 1 and 5"))
    }
}

/// Validates a `#RRGGBB` color string.
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR_REGEX.is_match(color) {
        Ok(())
    } else {
        Err(error("color_format", "Color must be in #RRGGBB format"))
    }
}

/// Validates a `YYYY-MM-DD` calendar date. Empty strings are accepted.
pub fn validate_birthday(date: &str) -> Result<(), ValidationError> {
    if date.is_empty() || NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok() {
        Ok(())
    } else {
        Err(error("birthday_format", "Birthday must be in YYYY-MM-DD format"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;

    fn message(err: ValidationError) -> String {
        err.message.unwrap().to_string()
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("owner@trufurrs.com"));
        assert!(is_valid_email("first.last+pets@mail.example.co.uk"));
        assert!(is_valid_email("a@b.io"));
    }

    #[test]
    fn test_generated_emails_are_valid() {
        for _ in 0..20 {
            let email: String = SafeEmail().fake();
            assert!(is_valid_email(&email), "rejected {}", email);
        }
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@-example.com"));
        assert!(!is_valid_email("user name@example.com"));
    }

    #[test]
    fn test_validate_email_messages() {
        assert_eq!(message(validate_email("  ").unwrap_err()), "Email is required");
        assert_eq!(
            message(validate_email("nope").unwrap_err()),
            "Please enter a valid email"
        );
        assert!(validate_email(" owner@trufurrs.com ").is_ok());
    }

    #[test]
    fn test_name_pattern() {
        assert!(is_valid_name("Jo"));
        assert!(is_valid_name("Mary Ann Smith"));
        assert!(!is_valid_name("J"));
        assert!(!is_valid_name("R2D2"));
        assert!(!is_valid_name("O'Brien"));
        assert!(!is_valid_name(&"a".repeat(51)));
        assert!(is_valid_name(&"a".repeat(50)));
    }

    #[test]
    fn test_validate_full_name_messages() {
        assert_eq!(
            message(validate_full_name("").unwrap_err()),
            "Full name is required"
        );
        assert_eq!(
            message(validate_full_name(" A ").unwrap_err()),
            "Name must be at least 2 characters"
        );
        assert_eq!(
            message(validate_full_name("Rex 9000").unwrap_err()),
            "Please enter a valid name"
        );
        assert!(validate_full_name("Sam Carter").is_ok());
    }

    #[test]
    fn test_name_rejects_unicode_whitespace() {
        assert!(!is_valid_name("Jo\u{00A0}Smith"));
        assert!(!is_valid_name("Jo\u{2003}Smith"));
        assert!(is_valid_name("Jo\tSmith"));
    }

    #[test]
    fn test_validate_pet_name() {
        assert!(validate_pet_name("Biscuit").is_ok());
        assert!(validate_pet_name(" Mochi ").is_ok());
        assert_eq!(
            message(validate_pet_name("   ").unwrap_err()),
            "Pet name must be 1-50 characters"
        );
        assert!(validate_pet_name("").is_err());
        assert!(validate_pet_name(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_phone_rejects_non_ascii_digits() {
        assert!(!is_valid_phone("1\u{0662}\u{0663}\u{0664}"));
        assert!(!is_valid_phone("+1\u{FF15}\u{FF15}\u{FF15}"));
    }

    #[test]
    fn test_phone_pattern() {
        assert!(is_valid_phone(""));
        assert!(is_valid_phone("+14155552671"));
        assert!(is_valid_phone("415 555 2671"));
        assert!(is_valid_phone("12"));
        assert!(!is_valid_phone("0123456"));
        assert!(!is_valid_phone("+1"));
        assert!(!is_valid_phone("555-1234"));
        assert!(!is_valid_phone("+1234567890123456"));
    }

    #[test]
    fn test_validate_phone_message() {
        assert_eq!(
            message(validate_phone("abc").unwrap_err()),
            "Please enter a valid phone number"
        );
    }

    #[test]
    fn test_password_strength() {
        assert!(is_valid_password("abcdef12"));
        assert!(is_valid_password("Pa$$w0rd!"));
        assert!(!is_valid_password("abcdefgh"));
        assert!(!is_valid_password("12345678"));
        assert!(!is_valid_password("abc12"));
        assert!(!is_valid_password("abcd 1234"));
        assert!(!is_valid_password("pässword1"));
        assert!(!is_valid_password("abcdef1\u{0663}"));
        assert!(!is_valid_password("abcdefg\u{0663}"));
    }

    #[test]
    fn test_validate_new_password_messages() {
        assert_eq!(
            message(validate_new_password("").unwrap_err()),
            "Password is required"
        );
        assert_eq!(
            message(validate_new_password("short1").unwrap_err()),
            "Password must be at least 8 characters with letters and numbers"
        );
    }

    #[test]
    fn test_validate_login_password() {
        assert!(validate_login_password("123456").is_ok());
        assert_eq!(
            message(validate_login_password("12345").unwrap_err()),
            "Password must be at least 6 characters"
        );
        assert_eq!(
            message(validate_login_password("").unwrap_err()),
            "Password is required"
        );
    }

    #[test]
    fn test_password_confirmation() {
        assert!(validate_password_confirmation("secret123", "secret123").is_ok());
        assert_eq!(
            message(validate_password_confirmation("secret123", "").unwrap_err()),
            "Please confirm your password"
        );
        assert_eq!(
            message(validate_password_confirmation("secret123", "secret124").unwrap_err()),
            "Passwords do not match"
        );
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_latitude(90.0).is_ok());
        assert!(validate_latitude(-90.1).is_err());
        assert!(validate_longitude(-180.0).is_ok());
        assert!(validate_longitude(180.1).is_err());
    }

    #[test]
    fn test_validate_battery_level() {
        assert!(validate_battery_level(0).is_ok());
        assert!(validate_battery_level(100).is_ok());
        assert!(validate_battery_level(101).is_err());
        assert!(validate_battery_level(-1).is_err());
    }

    #[test]
    fn test_validate_geofence_bounds() {
        assert!(validate_geofence_radius(20.0).is_ok());
        assert!(validate_geofence_radius(1000.0).is_ok());
        assert!(validate_geofence_radius(19.9).is_err());
        assert!(validate_geofence_radius(1000.5).is_err());
        assert!(validate_geofence_priority(1).is_ok());
        assert!(validate_geofence_priority(5).is_ok());
        assert!(validate_geofence_priority(0).is_err());
        assert!(validate_geofence_priority(6).is_err());
    }

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("#4CAF50").is_ok());
        assert!(validate_hex_color("#00291b").is_ok());
        assert!(validate_hex_color("4CAF50").is_err());
        assert!(validate_hex_color("#4CAF5").is_err());
    }

    #[test]
    fn test_validate_birthday() {
        assert!(validate_birthday("").is_ok());
        assert!(validate_birthday("2020-02-29").is_ok());
        assert!(validate_birthday("2021-02-29").is_err());
        assert!(validate_birthday("03/04/2020").is_err());
    }
}
