//! Authentication DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::identity::{AuthResult, GetUserQueryResponse};
use crate::domain::CreateUserDto;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254, message = "email is required"))]
    #[schema(example = "admin@catalogue.local")]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: GetUserQueryResponse,
}

impl From<AuthResult> for LoginResponse {
    fn from(a: AuthResult) -> Self {
        Self {
            token: a.token,
            token_type: a.token_type,
            expires_in: a.expires_in,
            user: a.user,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1–100 characters"))]
    pub name: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[schema(value_type = String, format = Date, example = "1990-12-10")]
    pub birth_date: NaiveDate,
    #[validate(length(min = 8, max = 128, message = "password must be 8–128 characters"))]
    pub password: String,
}

impl From<RegisterRequest> for CreateUserDto {
    fn from(r: RegisterRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            birth_date: r.birth_date,
            role: None,
            password: r.password,
        }
    }
}
