//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives unified access to all per-aggregate repositories.

use async_trait::async_trait;

use super::category::CategoryRepository;
use super::product::ProductRepository;
use super::user::UserRepository;
use crate::shared::DomainResult;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let product = repos.products().find_by_id(id).await?;
///     let page = repos.categories().find_page(PageRequest::default()).await?;
/// }
/// ```
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    fn categories(&self) -> &dyn CategoryRepository;
    fn products(&self) -> &dyn ProductRepository;
    fn users(&self) -> &dyn UserRepository;

    /// Round-trip to the backing store, used by the health check.
    async fn ping(&self) -> DomainResult<()>;
}
