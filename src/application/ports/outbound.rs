//! Outbound ports: interfaces to collaborators outside the catalogue
//!
//! [`TokenValidator`] decouples request authentication from the concrete token
//! format. The production implementation is
//! [`JwtTokenValidator`](crate::infrastructure::crypto::jwt::JwtTokenValidator).

use thiserror::Error;
use uuid::Uuid;

use crate::domain::Role;

/// Identity carried by a valid bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: Uuid,
    pub email: String,
    pub role: Role,
}

/// Errors that can occur during authentication
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Missing authentication token")]
    MissingToken,
    #[error("Invalid authentication token")]
    InvalidToken,
    #[error("Token has expired")]
    ExpiredToken,
    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str) -> Result<Principal, AuthError>;
}
