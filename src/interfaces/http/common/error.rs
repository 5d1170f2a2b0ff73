//! Error body and the mapping from domain errors to HTTP statuses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::AuthError;
use crate::domain::DomainError;

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable description
    pub message: String,
    /// Stable machine-readable category, e.g. `not_found`
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.to_string(),
        }
    }
}

/// Handler error. Wraps a [`DomainError`] and renders it as `{message, code}`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InsufficientPermissions => Self(DomainError::Forbidden(e.to_string())),
            _ => Self(DomainError::Unauthenticated(e.to_string())),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorResponse {
        match &self.0 {
            DomainError::Validation(m) => ErrorResponse::new("validation_error", m.clone()),
            DomainError::Unauthenticated(m) => {
                ErrorResponse::new("authentication_error", m.clone())
            }
            DomainError::Forbidden(m) => ErrorResponse::new("authorization_error", m.clone()),
            DomainError::NotFound {
                entity,
                field,
                value,
            } => ErrorResponse::new(
                "not_found",
                format!("{entity} with {field} '{value}' was not found"),
            ),
            DomainError::Conflict(m) => ErrorResponse::new("conflict", m.clone()),
            DomainError::Internal(_) => {
                ErrorResponse::new("internal_error", "Internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let DomainError::Internal(detail) = &self.0 {
            error!(error = %detail, "Request failed");
        }
        (self.status(), Json(self.body())).into_response()
    }
}

/// Parse a path id, answering 400 with the usual body when it is not a UUID.
pub fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| ApiError(DomainError::Validation(format!("'{raw}' is not a valid id"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (DomainError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::Unauthenticated("x".into()), StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (DomainError::not_found("Product", 1), StatusCode::NOT_FOUND),
            (DomainError::Conflict("x".into()), StatusCode::CONFLICT),
            (DomainError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[test]
    fn internal_details_are_hidden() {
        let body = ApiError(DomainError::Internal("db password wrong".into())).body();
        assert_eq!(body.message, "Internal server error");
        assert_eq!(body.code, "internal_error");
    }

    #[test]
    fn auth_errors_split_into_401_and_403() {
        assert_eq!(ApiError::from(AuthError::MissingToken).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::from(AuthError::ExpiredToken).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::from(AuthError::InsufficientPermissions).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn bad_path_id_is_validation_error() {
        let err = parse_id("abc").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(parse_id(&Uuid::new_v4().to_string()).is_ok());
    }
}
