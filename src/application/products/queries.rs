//! Product queries and their response projections

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use super::service::ProductService;
use crate::application::categories::GetCategoryQueryResponse;
use crate::domain::{DomainError, DomainResult, Identifiable, Product, ProductFilter};
use crate::shared::{Page, PageRequest};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetProductQueryResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Price in the smallest currency unit
    pub price: i64,
    pub stock: i32,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for GetProductQueryResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id(),
            created_at: p.created_at(),
            name: p.meta.name,
            description: p.description,
            price: p.price,
            stock: p.stock,
            category_id: p.category_id,
        }
    }
}

/// A product with its category resolved. `category` is `None` for
/// uncategorised products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetProductWithCatQueryResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub category: Option<GetCategoryQueryResponse>,
}

impl GetProductWithCatQueryResponse {
    fn new(p: Product, category: Option<GetCategoryQueryResponse>) -> Self {
        Self {
            id: p.id(),
            created_at: p.created_at(),
            name: p.meta.name,
            description: p.description,
            price: p.price,
            stock: p.stock,
            category,
        }
    }
}

impl ProductService {
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> DomainResult<Page<GetProductQueryResponse>> {
        let page = self.repos.products().find_page(filter, page).await?;
        debug!(
            total = page.metadata().total_count,
            returned = page.len(),
            "Listed products"
        );
        Ok(page.map(GetProductQueryResponse::from))
    }

    pub async fn get_product(&self, id: Uuid) -> DomainResult<GetProductQueryResponse> {
        self.find(id).await.map(GetProductQueryResponse::from)
    }

    pub async fn get_product_with_category(
        &self,
        id: Uuid,
    ) -> DomainResult<GetProductWithCatQueryResponse> {
        let product = self.find(id).await?;
        let category = match product.category_id {
            Some(category_id) => self
                .repos
                .categories()
                .find_by_id(category_id)
                .await?
                .map(GetCategoryQueryResponse::from),
            None => None,
        };
        Ok(GetProductWithCatQueryResponse::new(product, category))
    }

    /// Like [`list_products`](Self::list_products), with each item's category
    /// resolved in one batched lookup.
    pub async fn list_products_with_category(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> DomainResult<Page<GetProductWithCatQueryResponse>> {
        let page = self.repos.products().find_page(filter, page).await?;

        let mut category_ids: Vec<Uuid> =
            page.items().iter().filter_map(|p| p.category_id).collect();
        category_ids.sort_unstable();
        category_ids.dedup();

        let categories: HashMap<Uuid, GetCategoryQueryResponse> = self
            .repos
            .categories()
            .find_by_ids(&category_ids)
            .await?
            .into_iter()
            .map(|c| (c.id(), GetCategoryQueryResponse::from(c)))
            .collect();

        Ok(page.map(|p| {
            let category = p.category_id.and_then(|id| categories.get(&id).cloned());
            GetProductWithCatQueryResponse::new(p, category)
        }))
    }

    pub(super) async fn find(&self, id: Uuid) -> DomainResult<Product> {
        self.repos
            .products()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Product", id))
    }
}
