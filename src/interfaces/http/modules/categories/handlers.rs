//! Category API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::CategoryRequest;
use crate::application::categories::{
    CategoryService, GetCategoryQueryResponse, GetCategoryWithProdsQueryResponse,
};
use crate::interfaces::http::common::{
    parse_id, ApiResult, ErrorResponse, PageParams, PageQuery, Paginated, ValidatedJson,
};

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "One page of categories", body = [GetCategoryQueryResponse],
            headers(
                ("X-Pagination" = String, description = "JSON-encoded PaginationMetadata"),
                ("X-Pagination-Version" = u32, description = "Schema version of X-Pagination")
            )),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse)
    )
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    PageParams(page): PageParams,
) -> ApiResult<Paginated<GetCategoryQueryResponse>> {
    Ok(Paginated(service.list_categories(page).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Category ID (UUID)")),
    responses(
        (status = 200, description = "Category details", body = GetCategoryQueryResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> ApiResult<Json<GetCategoryQueryResponse>> {
    Ok(Json(service.get_category(parse_id(&id)?).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/products",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "One page of categories with their products", body = [GetCategoryWithProdsQueryResponse],
            headers(
                ("X-Pagination" = String, description = "JSON-encoded PaginationMetadata"),
                ("X-Pagination-Version" = u32, description = "Schema version of X-Pagination")
            )),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse)
    )
)]
pub async fn list_categories_with_products(
    State(service): State<Arc<CategoryService>>,
    PageParams(page): PageParams,
) -> ApiResult<Paginated<GetCategoryWithProdsQueryResponse>> {
    Ok(Paginated(service.list_categories_with_products(page).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/products/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Category ID (UUID)")),
    responses(
        (status = 200, description = "Category with its products", body = GetCategoryWithProdsQueryResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_category_with_products(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> ApiResult<Json<GetCategoryWithProdsQueryResponse>> {
    Ok(Json(service.get_category_with_products(parse_id(&id)?).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "Categories",
    security(("bearer_auth" = [])),
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = GetCategoryQueryResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    ValidatedJson(request): ValidatedJson<CategoryRequest>,
) -> ApiResult<(StatusCode, Json<GetCategoryQueryResponse>)> {
    let category = service.create_category(request.into()).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Category ID (UUID)")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = GetCategoryQueryResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse)
    )
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<CategoryRequest>,
) -> ApiResult<Json<GetCategoryQueryResponse>> {
    let category = service
        .update_category(parse_id(&id)?, request.into())
        .await?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Category ID (UUID)")),
    responses(
        (status = 204, description = "Category deleted; its products become uncategorised"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    service.delete_category(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
