//! Category request DTOs

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::application::categories::{CreateCategoryCommand, UpdateCategoryCommand};

/// Create or replace a category
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Kitchen")]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

impl From<CategoryRequest> for CreateCategoryCommand {
    fn from(r: CategoryRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
        }
    }
}

impl From<CategoryRequest> for UpdateCategoryCommand {
    fn from(r: CategoryRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
        }
    }
}
