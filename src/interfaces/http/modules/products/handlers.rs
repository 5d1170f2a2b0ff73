//! Product API handlers
//!
//! Thin wrappers over `ProductService`. Read routes need `Policy::Read`,
//! mutations `Policy::Manage`; both are enforced by the router.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{ProductFilterQuery, ProductRequest};
use crate::application::products::{
    GetProductQueryResponse, GetProductWithCatQueryResponse, ProductService,
};
use crate::domain::ProductFilter;
use crate::interfaces::http::common::{
    parse_id, ApiQuery, ApiResult, ErrorResponse, PageParams, PageQuery, Paginated, ValidatedJson,
};

impl From<ProductFilterQuery> for ProductFilter {
    fn from(q: ProductFilterQuery) -> Self {
        Self {
            category_id: q.category_id,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(PageQuery, ProductFilterQuery),
    responses(
        (status = 200, description = "One page of products", body = [GetProductQueryResponse],
            headers(
                ("X-Pagination" = String, description = "JSON-encoded PaginationMetadata"),
                ("X-Pagination-Version" = u32, description = "Schema version of X-Pagination")
            )),
        (status = 400, description = "Invalid paging or filter parameters", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn list_products(
    State(service): State<Arc<ProductService>>,
    PageParams(page): PageParams,
    ApiQuery(filter): ApiQuery<ProductFilterQuery>,
) -> ApiResult<Paginated<GetProductQueryResponse>> {
    let page = service.list_products(&filter.into(), page).await?;
    Ok(Paginated(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Product ID (UUID)")),
    responses(
        (status = 200, description = "Product details", body = GetProductQueryResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
) -> ApiResult<Json<GetProductQueryResponse>> {
    let product = service.get_product(parse_id(&id)?).await?;
    Ok(Json(product))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/category/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Product ID (UUID)")),
    responses(
        (status = 200, description = "Product with its category", body = GetProductWithCatQueryResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_product_with_category(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
) -> ApiResult<Json<GetProductWithCatQueryResponse>> {
    let product = service.get_product_with_category(parse_id(&id)?).await?;
    Ok(Json(product))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/category",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(PageQuery, ProductFilterQuery),
    responses(
        (status = 200, description = "One page of products with categories", body = [GetProductWithCatQueryResponse],
            headers(
                ("X-Pagination" = String, description = "JSON-encoded PaginationMetadata"),
                ("X-Pagination-Version" = u32, description = "Schema version of X-Pagination")
            )),
        (status = 400, description = "Invalid paging or filter parameters", body = ErrorResponse)
    )
)]
pub async fn list_products_with_category(
    State(service): State<Arc<ProductService>>,
    PageParams(page): PageParams,
    ApiQuery(filter): ApiQuery<ProductFilterQuery>,
) -> ApiResult<Paginated<GetProductWithCatQueryResponse>> {
    let page = service
        .list_products_with_category(&filter.into(), page)
        .await?;
    Ok(Paginated(page))
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = GetProductQueryResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn create_product(
    State(service): State<Arc<ProductService>>,
    ValidatedJson(request): ValidatedJson<ProductRequest>,
) -> ApiResult<(StatusCode, Json<GetProductQueryResponse>)> {
    let product = service.create_product(request.into()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Product ID (UUID)")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = GetProductQueryResponse),
        (status = 404, description = "Product or category not found", body = ErrorResponse)
    )
)]
pub async fn update_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ProductRequest>,
) -> ApiResult<Json<GetProductQueryResponse>> {
    let product = service
        .update_product(parse_id(&id)?, request.into())
        .await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Product ID (UUID)")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    service.delete_product(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
