//! Category queries and their response projections

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::service::CategoryService;
use crate::application::products::GetProductQueryResponse;
use crate::domain::{Category, DomainError, DomainResult, Identifiable};
use crate::shared::{Page, PageRequest};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetCategoryQueryResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for GetCategoryQueryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id(),
            created_at: c.created_at(),
            name: c.meta.name,
            description: c.description,
        }
    }
}

/// A category together with every product filed under it, in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetCategoryWithProdsQueryResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub description: Option<String>,
    pub products: Vec<GetProductQueryResponse>,
}

impl GetCategoryWithProdsQueryResponse {
    fn new(c: Category, products: Vec<GetProductQueryResponse>) -> Self {
        Self {
            id: c.id(),
            created_at: c.created_at(),
            name: c.meta.name,
            description: c.description,
            products,
        }
    }
}

impl CategoryService {
    pub async fn list_categories(
        &self,
        page: PageRequest,
    ) -> DomainResult<Page<GetCategoryQueryResponse>> {
        let page = self.repos.categories().find_page(page).await?;
        Ok(page.map(GetCategoryQueryResponse::from))
    }

    pub async fn get_category(&self, id: Uuid) -> DomainResult<GetCategoryQueryResponse> {
        self.find(id).await.map(GetCategoryQueryResponse::from)
    }

    pub async fn get_category_with_products(
        &self,
        id: Uuid,
    ) -> DomainResult<GetCategoryWithProdsQueryResponse> {
        let category = self.find(id).await?;
        let products = self
            .repos
            .products()
            .find_by_category_ids(&[id])
            .await?
            .into_iter()
            .map(GetProductQueryResponse::from)
            .collect();
        Ok(GetCategoryWithProdsQueryResponse::new(category, products))
    }

    /// Pages over categories; products of the whole page are loaded in one lookup.
    pub async fn list_categories_with_products(
        &self,
        page: PageRequest,
    ) -> DomainResult<Page<GetCategoryWithProdsQueryResponse>> {
        let page = self.repos.categories().find_page(page).await?;
        let ids: Vec<Uuid> = page.items().iter().map(|c| c.id()).collect();

        let mut by_category: HashMap<Uuid, Vec<GetProductQueryResponse>> = HashMap::new();
        for product in self.repos.products().find_by_category_ids(&ids).await? {
            if let Some(category_id) = product.category_id {
                by_category
                    .entry(category_id)
                    .or_default()
                    .push(product.into());
            }
        }

        Ok(page.map(|c| {
            let products = by_category.remove(&c.id()).unwrap_or_default();
            GetCategoryWithProdsQueryResponse::new(c, products)
        }))
    }

    pub(super) async fn find(&self, id: Uuid) -> DomainResult<Category> {
        self.repos
            .categories()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", id))
    }
}
