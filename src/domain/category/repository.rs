//! Category repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Category;
use crate::shared::{DomainResult, Page, PageRequest};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Category>>;
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Category>>;
    /// Categories with the given ids, in listing order. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<Category>>;
    async fn find_page(&self, page: PageRequest) -> DomainResult<Page<Category>>;
    async fn save(&self, category: Category) -> DomainResult<Category>;
    async fn update(&self, category: Category) -> DomainResult<Category>;
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
