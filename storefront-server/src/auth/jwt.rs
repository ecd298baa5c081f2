//! JWT token service
//!
//! Verifies the bearer tokens issued by the identity collaborator and turns
//! their claims into a [`CurrentUser`]. The core performs no credential
//! validation of its own.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Administrator role name as issued by the identity collaborator
pub const ROLE_ADMIN: &str = "admin";

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes in production)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    /// Token issuer
    pub issuer: String,
}

impl JwtConfig {
    /// Load from `JWT_SECRET` / `JWT_EXPIRATION_MINUTES` / `JWT_ISSUER`
    pub fn from_env() -> Self {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(s) if s.len() >= 32 => s,
            Ok(_) => {
                tracing::warn!("JWT_SECRET is shorter than 32 characters; using it anyway");
                std::env::var("JWT_SECRET").unwrap_or_default()
            }
            Err(_) => {
                tracing::warn!("JWT_SECRET not set, using development-only key");
                "storefront-development-secret-key-not-for-production".to_string()
            }
        };

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "storefront".to_string()),
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject)
    pub sub: String,
    /// Role: customer | admin
    pub role: String,
    /// Expiration timestamp (seconds)
    pub exp: i64,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token has expired")]
    ExpiredToken,

    #[error("token generation failed: {0}")]
    GenerationFailed(String),
}

/// Verified caller identity: `(user id, role)` supplied by the identity
/// collaborator. The order core trusts this pair and checks nothing else.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User ID
    pub id: String,
    /// Role name
    pub role: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
        }
    }
}

/// JWT encode/decode service
#[derive(Clone)]
pub struct JwtService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    config: JwtConfig,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .finish()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            config,
        }
    }

    /// Generate a token for a user (used by tests and dev tooling; issuance
    /// belongs to the identity collaborator)
    pub fn generate_token(&self, user_id: &str, role: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            exp: (now + Duration::minutes(self.config.expiration_minutes)).timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate a token and return its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }

    /// Extract the raw token from an `Authorization: Bearer ...` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ").map(str::trim)
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new(JwtConfig::from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new(JwtConfig {
            secret: "test-secret-key-test-secret-key-1234".into(),
            expiration_minutes: 60,
            issuer: "storefront".into(),
        })
    }

    #[test]
    fn test_token_roundtrip() {
        let svc = service();
        let token = svc.generate_token("user:alice", "customer").unwrap();
        let claims = svc.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user:alice");
        assert_eq!(claims.role, "customer");

        let user = CurrentUser::from(claims);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_admin_role() {
        let svc = service();
        let token = svc.generate_token("user:root", ROLE_ADMIN).unwrap();
        let user = CurrentUser::from(svc.validate_token(&token).unwrap());
        assert!(user.is_admin());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(
            service().validate_token("not-a-token"),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(
            JwtService::extract_from_header("Bearer abc.def.ghi"),
            Some("abc.def.ghi")
        );
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
