//! Pagination at the HTTP edge
//!
//! [`PageParams`] turns `?pageNumber=&pageSize=` into a validated
//! [`PageRequest`]; [`Paginated`] writes the items as a JSON array and the
//! metadata into the `X-Pagination` header.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use super::error::ApiError;
use super::query::ApiQuery;
use crate::domain::DomainError;
use crate::shared::{
    InfraError, Page, PageRequest, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
    PAGINATION_SCHEMA_VERSION,
};

/// JSON-encoded [`PaginationMetadata`](crate::shared::PaginationMetadata)
pub const X_PAGINATION: &str = "x-pagination";
/// Schema version of the `X-Pagination` payload
pub const X_PAGINATION_VERSION: &str = "x-pagination-version";

/// Upper bound for `pageSize`, taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub max_page_size: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Raw paging query parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct PageQuery {
    /// 1-based page index (default 1)
    pub page_number: Option<i64>,
    /// Items per page (default 10)
    pub page_size: Option<i64>,
}

/// Extractor yielding a validated [`PageRequest`]. Rejects with 400.
#[derive(Debug, Clone, Copy)]
pub struct PageParams(pub PageRequest);

impl<S> FromRequestParts<S> for PageParams
where
    PageLimits: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ApiQuery(query) = ApiQuery::<PageQuery>::from_request_parts(parts, state).await?;

        let limits = PageLimits::from_ref(state);
        let request = PageRequest::with_max_page_size(
            query.page_number.unwrap_or(DEFAULT_PAGE_NUMBER),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            limits.max_page_size,
        )?;
        Ok(Self(request))
    }
}

/// List response: body is the page's items, metadata travels in headers.
pub struct Paginated<T>(pub Page<T>);

impl<T: Serialize> IntoResponse for Paginated<T> {
    fn into_response(self) -> Response {
        let (items, metadata) = self.0.into_parts();

        let header = serde_json::to_string(&metadata)
            .map_err(|e| DomainError::from(InfraError::from(e)))
            .and_then(|json| {
                HeaderValue::from_str(&json).map_err(|e| DomainError::Internal(e.to_string()))
            });

        match header {
            Ok(value) => {
                let mut response = Json(items).into_response();
                let headers = response.headers_mut();
                headers.insert(X_PAGINATION, value);
                headers.insert(
                    X_PAGINATION_VERSION,
                    HeaderValue::from(PAGINATION_SCHEMA_VERSION),
                );
                response
            }
            Err(e) => ApiError(e).into_response(),
        }
    }
}
