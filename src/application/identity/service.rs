//! User management service: application-layer orchestration
//!
//! All user-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use bcrypt::DEFAULT_COST;
use tracing::{info, warn};
use uuid::Uuid;

use super::queries::GetUserQueryResponse;
use crate::domain::{
    CreateUserDto, DomainError, DomainResult, EntityMeta, RepositoryProvider, Role, User,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password_with_cost, verify_password};
use crate::shared::{InfraError, Page, PageRequest};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: GetUserQueryResponse,
}

/// User service. Orchestrates all identity / user-management use-cases.
pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    password_cost: u32,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self {
            repos,
            jwt_config,
            password_cost: DEFAULT_COST,
        }
    }

    /// Override the bcrypt work factor (4..=31).
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a bearer token.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let user = self
            .repos
            .users()
            .find_by_email(&normalize_email(email))
            .await?;

        let Some(user) = user.filter(|u| verify_password(password, &u.password_hash)) else {
            warn!("Rejected login attempt");
            return Err(DomainError::Unauthenticated("Invalid credentials".into()));
        };

        let token = create_token(user.meta.id(), &user.email, user.role, &self.jwt_config)
            .map_err(|e| InfraError::Crypto(format!("Failed to create token: {}", e)))?;

        info!(user_id = %user.meta.id(), "User logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user: user.into(),
        })
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new customer. Any requested role is ignored.
    pub async fn register(&self, dto: CreateUserDto) -> DomainResult<GetUserQueryResponse> {
        let user = self
            .create_user(CreateUserDto {
                role: Some(Role::Customer),
                ..dto
            })
            .await?;
        info!(user_id = %user.id, "New user registered");
        Ok(user)
    }

    /// Create a user with the requested role (default: customer).
    pub async fn create_user(&self, dto: CreateUserDto) -> DomainResult<GetUserQueryResponse> {
        let name = dto.name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("name must not be empty".into()));
        }
        let email = normalize_email(&dto.email);
        if !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
        if dto.password.len() < 8 {
            return Err(DomainError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }

        if self.repos.users().find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "email '{email}' is already registered"
            )));
        }

        let password_hash = hash_password_with_cost(&dto.password, self.password_cost)
            .map_err(|e| InfraError::Crypto(format!("Failed to hash password: {}", e)))?;

        let user = User {
            meta: EntityMeta::new(name),
            email,
            password_hash,
            birth_date: dto.birth_date,
            role: dto.role.unwrap_or_default(),
        };

        Ok(self.repos.users().save(user).await?.into())
    }

    /// Create the given admin account when no users exist yet.
    ///
    /// Returns `true` if an account was created.
    pub async fn ensure_admin(&self, dto: CreateUserDto) -> DomainResult<bool> {
        if self.repos.users().count().await? > 0 {
            return Ok(false);
        }
        let admin = self
            .create_user(CreateUserDto {
                role: Some(Role::Admin),
                ..dto
            })
            .await?;
        warn!(email = %admin.email, "Default admin account created; change its password");
        Ok(true)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_users(&self, page: PageRequest) -> DomainResult<Page<GetUserQueryResponse>> {
        let page = self.repos.users().find_page(page).await?;
        Ok(page.map(GetUserQueryResponse::from))
    }

    pub async fn get_user(&self, id: Uuid) -> DomainResult<GetUserQueryResponse> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .map(GetUserQueryResponse::from)
            .ok_or_else(|| DomainError::not_found("User", id))
    }
}
