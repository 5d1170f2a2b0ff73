//! User management API handlers
//!
//! Admin-only listing endpoints. Delegates to `UserService` from the
//! application/identity layer.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::application::identity::{GetUserQueryResponse, UserService};
use crate::interfaces::http::common::{
    parse_id, ApiResult, ErrorResponse, PageParams, PageQuery, Paginated,
};

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "One page of users", body = [GetUserQueryResponse],
            headers(
                ("X-Pagination" = String, description = "JSON-encoded PaginationMetadata"),
                ("X-Pagination-Version" = u32, description = "Schema version of X-Pagination")
            )),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(service): State<Arc<UserService>>,
    PageParams(page): PageParams,
) -> ApiResult<Paginated<GetUserQueryResponse>> {
    Ok(Paginated(service.list_users(page).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID (UUID)")),
    responses(
        (status = 200, description = "User details", body = GetUserQueryResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<String>,
) -> ApiResult<Json<GetUserQueryResponse>> {
    Ok(Json(service.get_user(parse_id(&id)?).await?))
}
