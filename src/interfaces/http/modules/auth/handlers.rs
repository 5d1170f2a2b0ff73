//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::application::identity::{GetUserQueryResponse, UserService};
use crate::interfaces::http::common::{ApiResult, ErrorResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(service): State<Arc<UserService>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let auth = service.login(&request.email, &request.password).await?;
    Ok(Json(auth.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Customer account created", body = GetUserQueryResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn register(
    State(service): State<Arc<UserService>>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<GetUserQueryResponse>)> {
    let user = service.register(request.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's account", body = GetUserQueryResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn get_current_user(
    State(service): State<Arc<UserService>>,
    user: AuthenticatedUser,
) -> ApiResult<Json<GetUserQueryResponse>> {
    Ok(Json(service.get_user(user.user_id).await?))
}
