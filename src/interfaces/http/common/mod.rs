//! Shared HTTP building blocks: error body, pagination header, extractors

pub mod error;
pub mod pagination;
pub mod query;
pub mod validated_json;

pub use error::{parse_id, ApiError, ApiResult, ErrorResponse};
pub use pagination::{
    PageLimits, PageParams, PageQuery, Paginated, X_PAGINATION, X_PAGINATION_VERSION,
};
pub use query::ApiQuery;
pub use validated_json::ValidatedJson;
