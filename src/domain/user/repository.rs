use async_trait::async_trait;
use uuid::Uuid;

use super::User;
use crate::shared::{DomainResult, Page, PageRequest};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn find_page(&self, page: PageRequest) -> DomainResult<Page<User>>;
    async fn count(&self) -> DomainResult<u64>;
    /// Insert a new user; a taken email yields `DomainError::Conflict`.
    async fn save(&self, user: User) -> DomainResult<User>;
}
