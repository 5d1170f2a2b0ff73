//! JSON body extractor that also runs `validator` rules.
//!
//! Undecodable bodies are answered with 400, rule violations with 422.
//! Both use the `{message, code}` error body.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::error::{ApiError, ErrorResponse};
use crate::shared::DomainError;

/// Like [`Json`], but the value has passed `Validate::validate` when the
/// handler sees it.
///
/// ```ignore
/// async fn create(ValidatedJson(body): ValidatedJson<CategoryRequest>) { .. }
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum BodyRejection {
    Malformed(JsonRejection),
    Invalid(ValidationErrors),
}

/// `field: reason` pairs joined with `; `, ordered by field name.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let parts: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{field}: {msg}"),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect();

    if parts.is_empty() {
        "Validation failed".to_string()
    } else {
        parts.join("; ")
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Malformed(rejection) => ApiError(DomainError::Validation(format!(
                "Invalid JSON body: {}",
                rejection.body_text()
            )))
            .into_response(),
            Self::Invalid(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::new("validation_error", describe(&errors))),
            )
                .into_response(),
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(BodyRejection::Malformed)?;
        value.validate().map_err(BodyRejection::Invalid)?;
        Ok(Self(value))
    }
}
