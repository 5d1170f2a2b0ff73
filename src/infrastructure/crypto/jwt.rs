//! JWT Token handling

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::{AuthError, Principal, TokenValidator};
use crate::domain::Role;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "super-secret-key-change-in-production".to_string(),
            expiration_hours: 24,
            issuer: "catalogue-service".to_string(),
        }
    }
}

/// JWT TokenClaims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    /// User role
    pub role: Role,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    pub fn new(user_id: Uuid, email: &str, role: Role, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }
}

/// Create a JWT token for a user
pub fn create_token(
    user_id: Uuid,
    email: &str,
    role: Role,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let token_claims = TokenClaims::new(user_id, email, role, config);
    encode_claims(&token_claims, config)
}

fn encode_claims(
    claims: &TokenClaims,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify and decode a JWT token
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// [`TokenValidator`] backed by HS256 tokens signed with the configured secret.
#[derive(Clone)]
pub struct JwtTokenValidator {
    config: JwtConfig,
}

impl JwtTokenValidator {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

impl TokenValidator for JwtTokenValidator {
    fn validate(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = verify_token(token, &self.config).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })?;

        let subject = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

        Ok(Principal {
            subject,
            email: claims.email,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
            ..JwtConfig::default()
        }
    }

    #[test]
    fn test_create_and_validate_token() {
        let config = config();
        let id = Uuid::new_v4();
        let token = create_token(id, "admin@example.com", Role::Admin, &config).unwrap();

        let principal = JwtTokenValidator::new(config).validate(&token).unwrap();
        assert_eq!(principal.subject, id);
        assert_eq!(principal.email, "admin@example.com");
        assert_eq!(principal.role, Role::Admin);
    }

    #[test]
    fn test_invalid_token() {
        let validator = JwtTokenValidator::new(config());
        assert_eq!(validator.validate("invalid-token"), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let token = create_token(Uuid::new_v4(), "a@b.c", Role::Customer, &JwtConfig::default())
            .unwrap();
        let validator = JwtTokenValidator::new(config());
        assert_eq!(validator.validate(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_expired_token() {
        let config = config();
        let mut claims = TokenClaims::new(Uuid::new_v4(), "a@b.c", Role::Customer, &config);
        claims.iat -= 7200;
        claims.exp = Utc::now().timestamp() - 3600;
        let token = encode_claims(&claims, &config).unwrap();

        let validator = JwtTokenValidator::new(config);
        assert_eq!(validator.validate(&token), Err(AuthError::ExpiredToken));
    }
}
