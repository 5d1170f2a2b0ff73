//! Product request DTOs

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::application::products::{CreateProductCommand, UpdateProductCommand};

/// Create or replace a product
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[validate(length(min = 1, max = 200))]
    #[schema(example = "Cast iron kettle")]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Price in the smallest currency unit
    #[validate(range(min = 0))]
    #[schema(example = 2999)]
    pub price: i64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock: i32,
    pub category_id: Option<Uuid>,
}

impl From<ProductRequest> for CreateProductCommand {
    fn from(r: ProductRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            price: r.price,
            stock: r.stock,
            category_id: r.category_id,
        }
    }
}

impl From<ProductRequest> for UpdateProductCommand {
    fn from(r: ProductRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            price: r.price,
            stock: r.stock,
            category_id: r.category_id,
        }
    }
}

/// Product listing filter
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ProductFilterQuery {
    /// Only products filed under this category
    pub category_id: Option<Uuid>,
}
