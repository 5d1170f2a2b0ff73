//! SeaORM implementation of RepositoryProvider

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

use super::category_repository::SeaOrmCategoryRepository;
use super::db_err;
use super::product_repository::SeaOrmProductRepository;
use super::user_repository::SeaOrmUserRepository;
use crate::domain::{
    CategoryRepository, DomainResult, ProductRepository, RepositoryProvider, UserRepository,
};

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let product = repos.products().find_by_id(id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    db: DatabaseConnection,
    categories: SeaOrmCategoryRepository,
    products: SeaOrmProductRepository,
    users: SeaOrmUserRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            categories: SeaOrmCategoryRepository::new(db.clone()),
            products: SeaOrmProductRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db.clone()),
            db,
        }
    }
}

#[async_trait]
impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn categories(&self) -> &dyn CategoryRepository {
        &self.categories
    }

    fn products(&self) -> &dyn ProductRepository {
        &self.products
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    async fn ping(&self) -> DomainResult<()> {
        let backend = self.db.get_database_backend();
        self.db
            .execute(Statement::from_string(backend, "SELECT 1"))
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
