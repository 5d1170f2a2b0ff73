//! Product repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Product;
use crate::shared::{DomainResult, Page, PageRequest};

/// Filters applied before pagination, so `total_count` matches the filtered set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category_id: Option<Uuid>,
}

impl ProductFilter {
    pub fn by_category(category_id: Uuid) -> Self {
        Self {
            category_id: Some(category_id),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self.category_id {
            Some(id) => product.category_id == Some(id),
            None => true,
        }
    }
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Product>>;
    async fn find_page(&self, filter: &ProductFilter, page: PageRequest)
        -> DomainResult<Page<Product>>;
    /// Every product filed under one of `category_ids`, in listing order.
    async fn find_by_category_ids(&self, category_ids: &[Uuid]) -> DomainResult<Vec<Product>>;
    async fn save(&self, product: Product) -> DomainResult<Product>;
    async fn update(&self, product: Product) -> DomainResult<Product>;
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
