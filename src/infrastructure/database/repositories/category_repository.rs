//! SeaORM implementation of CategoryRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::info;
use uuid::Uuid;

use super::{db_err, sql_offset, write_err};
use crate::domain::{Category, CategoryRepository, DomainError, DomainResult, EntityMeta};
use crate::infrastructure::database::entities::category;
use crate::shared::{Page, PageRequest};

fn model_to_domain(m: category::Model) -> Category {
    Category {
        meta: EntityMeta::restore(m.id, m.name, m.created_at),
        description: m.description,
    }
}

fn domain_to_active(c: &Category) -> category::ActiveModel {
    category::ActiveModel {
        id: Set(c.meta.id()),
        name: Set(c.meta.name.clone()),
        description: Set(c.description.clone()),
        created_at: Set(c.meta.created_at()),
    }
}

pub struct SeaOrmCategoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Category>> {
        let model = category::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Category>> {
        let model = category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = category::Entity::find()
            .filter(category::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(category::Column::CreatedAt)
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_page(&self, page: PageRequest) -> DomainResult<Page<Category>> {
        let total = category::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)?;

        let Some(offset) = sql_offset(page, total) else {
            return Ok(Page::from_slice(Vec::new(), total, page));
        };

        let models = category::Entity::find()
            .order_by_asc(category::Column::CreatedAt)
            .order_by_asc(category::Column::Id)
            .offset(offset)
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Page::from_slice(
            models.into_iter().map(model_to_domain).collect(),
            total,
            page,
        ))
    }

    async fn save(&self, c: Category) -> DomainResult<Category> {
        let result = domain_to_active(&c)
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, format!("category '{}' already exists", c.meta.name)))?;
        info!(category_id = %result.id, name = %result.name, "Category saved");
        Ok(model_to_domain(result))
    }

    async fn update(&self, c: Category) -> DomainResult<Category> {
        let exists = category::Entity::find_by_id(c.meta.id())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::not_found("Category", c.meta.id()));
        }

        let result = domain_to_active(&c)
            .update(&self.db)
            .await
            .map_err(|e| write_err(e, format!("category '{}' already exists", c.meta.name)))?;
        Ok(model_to_domain(result))
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = category::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Category", id));
        }
        info!(category_id = %id, "Category deleted");
        Ok(())
    }
}
