//! Sign-in, sign-up and password reset payloads.

use serde::Deserialize;
use validator::{Validate, ValidationError};

const TERMS_MESSAGE: &str = "Please accept the Terms & Conditions and Privacy Policy";

fn terms_error() -> ValidationError {
    let mut err = ValidationError::new("terms_not_accepted");
    err.message = Some(TERMS_MESSAGE.into());
    err
}

/// Reset requests report an empty address differently from the sign-in form.
fn validate_reset_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        let mut err = ValidationError::new("email_required");
        err.message = Some("Please enter your email first".into());
        return Err(err);
    }
    shared::validation::validate_email(email)
}

fn validate_sign_up(request: &SignUpRequest) -> Result<(), ValidationError> {
    shared::validation::validate_password_confirmation(
        &request.password,
        &request.confirm_password,
    )?;
    if !request.accept_terms {
        return Err(terms_error());
    }
    Ok(())
}

fn validate_google_sign_up(request: &GoogleSignUpRequest) -> Result<(), ValidationError> {
    if !request.accept_terms {
        return Err(terms_error());
    }
    Ok(())
}

fn validate_reset_confirmation(request: &ConfirmPasswordResetRequest) -> Result<(), ValidationError> {
    shared::validation::validate_password_confirmation(
        &request.new_password,
        &request.confirm_password,
    )
}

/// Email sign-up form.
///
/// Field rules run first; confirmation and terms acceptance are checked once
/// every field is valid.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_sign_up"))]
pub struct SignUpRequest {
    #[validate(custom(function = "shared::validation::validate_full_name"))]
    pub full_name: String,

    #[validate(custom(function = "shared::validation::validate_email"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_phone"))]
    pub phone_number: Option<String>,

    #[validate(custom(function = "shared::validation::validate_new_password"))]
    pub password: String,

    #[serde(default)]
    pub confirm_password: String,

    #[serde(default)]
    pub accept_terms: bool,
}

impl SignUpRequest {
    pub fn full_name(&self) -> &str {
        self.full_name.trim()
    }

    pub fn email(&self) -> &str {
        self.email.trim()
    }

    /// Trimmed phone number, `None` when left blank.
    pub fn phone_number(&self) -> Option<String> {
        self.phone_number
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(custom(function = "shared::validation::validate_email"))]
    pub email: String,

    #[validate(custom(function = "shared::validation::validate_login_password"))]
    pub password: String,
}

impl LoginRequest {
    pub fn email(&self) -> &str {
        self.email.trim()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSignInRequest {
    #[validate(length(min = 1, message = "ID token is required"))]
    pub id_token: String,
}

/// Google sign-up; the profile fields come from the Google account.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_google_sign_up"))]
pub struct GoogleSignUpRequest {
    #[validate(length(min = 1, message = "ID token is required"))]
    pub id_token: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub photo_url: Option<String>,

    #[serde(default)]
    pub accept_terms: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_reset_email"))]
    pub email: String,
}

impl PasswordResetRequest {
    pub fn email(&self) -> &str {
        self.email.trim()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_reset_confirmation"))]
pub struct ConfirmPasswordResetRequest {
    #[validate(length(min = 1, message = "Reset token is required"))]
    pub token: String,

    #[validate(custom(function = "shared::validation::validate_new_password"))]
    pub new_password: String,

    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sign_up(overrides: serde_json::Value) -> SignUpRequest {
        let mut body = json!({
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "phoneNumber": "",
            "password": "secret123",
            "confirmPassword": "secret123",
            "acceptTerms": true
        });
        if let (Some(base), Some(extra)) = (body.as_object_mut(), overrides.as_object()) {
            for (k, v) in extra {
                base.insert(k.clone(), v.clone());
            }
        }
        serde_json::from_value(body).unwrap()
    }

    fn messages(errors: &validator::ValidationErrors) -> Vec<String> {
        errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .collect()
    }

    #[test]
    fn test_valid_sign_up() {
        let request = sign_up(json!({}));
        assert!(request.validate().is_ok());
        assert_eq!(request.phone_number(), None);
    }

    #[test]
    fn test_sign_up_requires_terms() {
        let errors = sign_up(json!({ "acceptTerms": false })).validate().unwrap_err();
        assert_eq!(messages(&errors), vec![TERMS_MESSAGE.to_string()]);
    }

    #[test]
    fn test_sign_up_password_mismatch() {
        let errors = sign_up(json!({ "confirmPassword": "secret124" }))
            .validate()
            .unwrap_err();
        assert_eq!(messages(&errors), vec!["Passwords do not match".to_string()]);
    }

    #[test]
    fn test_sign_up_field_errors_reported_first() {
        let errors = sign_up(json!({ "fullName": "J", "acceptTerms": false }))
            .validate()
            .unwrap_err();
        assert_eq!(
            messages(&errors),
            vec!["Name must be at least 2 characters".to_string()]
        );
    }

    #[test]
    fn test_sign_up_phone_trimmed() {
        let request = sign_up(json!({ "phoneNumber": " +15551234567 " }));
        assert_eq!(request.phone_number().as_deref(), Some("+15551234567"));
    }

    #[test]
    fn test_login_password_min_length() {
        let request = LoginRequest {
            email: "jane@example.com".into(),
            password: "12345".into(),
        };
        assert!(request.validate().is_err());

        let request = LoginRequest {
            email: "jane@example.com".into(),
            password: "123456".into(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_reset_requires_email_first() {
        let errors = PasswordResetRequest {
            email: "  ".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            messages(&errors),
            vec!["Please enter your email first".to_string()]
        );
    }

    #[test]
    fn test_google_sign_up_requires_terms() {
        let request: GoogleSignUpRequest =
            serde_json::from_value(json!({ "idToken": "tok" })).unwrap();
        assert!(request.validate().is_err());
    }
}
