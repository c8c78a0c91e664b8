//! Session tokens signed with RS256.
//!
//! The subject of every token is the account uid, the same identifier used
//! as the `userId` of the user document.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// JWT token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account uid
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    /// Unique token identifier
    pub jti: String,
    pub token_type: TokenType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// A freshly issued access/refresh pair.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

/// Signing keys and lifetimes for session tokens.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    pub access_token_expiry_secs: i64,
    pub refresh_token_expiry_secs: i64,
    /// Clock skew tolerance in seconds
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("algorithm", &self.algorithm)
            .field("access_token_expiry_secs", &self.access_token_expiry_secs)
            .field("refresh_token_expiry_secs", &self.refresh_token_expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

pub const DEFAULT_LEEWAY_SECS: u64 = 30;

impl JwtConfig {
    /// Builds an RS256 config from a PEM encoded RSA key pair.
    pub fn new(
        private_key_pem: &str,
        public_key_pem: &str,
        access_token_expiry_secs: i64,
        refresh_token_expiry_secs: i64,
    ) -> Result<Self, JwtError> {
        Self::with_leeway(
            private_key_pem,
            public_key_pem,
            access_token_expiry_secs,
            refresh_token_expiry_secs,
            DEFAULT_LEEWAY_SECS,
        )
    }

    pub fn with_leeway(
        private_key_pem: &str,
        public_key_pem: &str,
        access_token_expiry_secs: i64,
        refresh_token_expiry_secs: i64,
        leeway_secs: u64,
    ) -> Result<Self, JwtError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid private key: {}", e)))?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid public key: {}", e)))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            algorithm: Algorithm::RS256,
            access_token_expiry_secs,
            refresh_token_expiry_secs,
            leeway_secs,
        })
    }

    /// HS256 config for unit tests.
    #[cfg(test)]
    pub fn new_for_testing(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            access_token_expiry_secs: 900,
            refresh_token_expiry_secs: 604800,
            leeway_secs: 0,
        }
    }

    /// Returns `(token, jti)`.
    pub fn generate_access_token(&self, uid: &str) -> Result<(String, String), JwtError> {
        self.generate_token(uid, TokenType::Access, self.access_token_expiry_secs)
    }

    /// Returns `(token, jti)`.
    pub fn generate_refresh_token(&self, uid: &str) -> Result<(String, String), JwtError> {
        self.generate_token(uid, TokenType::Refresh, self.refresh_token_expiry_secs)
    }

    /// Issues both tokens for a signed-in account.
    pub fn issue_pair(&self, uid: &str) -> Result<TokenPair, JwtError> {
        let (access_token, _) = self.generate_access_token(uid)?;
        let (refresh_token, _) = self.generate_refresh_token(uid)?;
        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer",
            expires_in: self.access_token_expiry_secs,
        })
    }

    fn generate_token(
        &self,
        uid: &str,
        token_type: TokenType,
        expiry_secs: i64,
    ) -> Result<(String, String), JwtError> {
        if uid.is_empty() {
            return Err(JwtError::EncodingError("empty subject".to_string()));
        }

        let now = Utc::now();
        let jti = Uuid::new_v4().to_string();
        let claims = Claims {
            sub: uid.to_string(),
            exp: (now + Duration::seconds(expiry_secs)).timestamp(),
            iat: now.timestamp(),
            jti: jti.clone(),
            token_type,
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))?;

        Ok((token, jti))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(JwtError::InvalidToken);
        }
        Ok(claims)
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(JwtError::InvalidToken);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig::new_for_testing("trufurrs_test_secret_for_session_tokens")
    }

    #[test]
    fn test_access_token_round_trip() {
        let config = test_config();
        let (token, jti) = config.generate_access_token("uid-123").unwrap();

        let claims = config.validate_access_token(&token).unwrap();
        assert_eq!(claims.sub, "uid-123");
        assert_eq!(claims.jti, jti);
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let config = test_config();
        let (token, _) = config.generate_refresh_token("uid-123").unwrap();

        let claims = config.validate_refresh_token(&token).unwrap();
        assert_eq!(claims.token_type, TokenType::Refresh);
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let config = test_config();
        let (access, _) = config.generate_access_token("uid-1").unwrap();
        let (refresh, _) = config.generate_refresh_token("uid-1").unwrap();

        assert!(matches!(
            config.validate_refresh_token(&access),
            Err(JwtError::InvalidToken)
        ));
        assert!(matches!(
            config.validate_access_token(&refresh),
            Err(JwtError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token() {
        let mut config = test_config();
        config.access_token_expiry_secs = -10;

        let (token, _) = config.generate_access_token("uid-1").unwrap();
        assert!(matches!(
            config.validate_access_token(&token),
            Err(JwtError::TokenExpired)
        ));
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let other = JwtConfig::new_for_testing("another_secret_entirely");
        let (token, _) = other.generate_access_token("uid-1").unwrap();

        assert!(test_config().validate_access_token(&token).is_err());
    }

    #[test]
    fn test_malformed_token() {
        assert!(test_config().validate_token("not_a_jwt").is_err());
    }

    #[test]
    fn test_empty_subject_rejected() {
        assert!(matches!(
            test_config().generate_access_token(""),
            Err(JwtError::EncodingError(_))
        ));
    }

    #[test]
    fn test_issue_pair() {
        let config = test_config();
        let pair = config.issue_pair("uid-9").unwrap();

        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 900);
        assert_eq!(
            config.validate_access_token(&pair.access_token).unwrap().sub,
            "uid-9"
        );
        assert_eq!(
            config.validate_refresh_token(&pair.refresh_token).unwrap().sub,
            "uid-9"
        );
    }

    #[test]
    fn test_token_type_serialization() {
        assert_eq!(
            serde_json::to_string(&TokenType::Access).unwrap(),
            "\"access\""
        );
        assert_eq!(
            serde_json::to_string(&TokenType::Refresh).unwrap(),
            "\"refresh\""
        );
    }
}
