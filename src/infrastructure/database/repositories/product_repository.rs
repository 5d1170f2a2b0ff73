//! SeaORM implementation of ProductRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};
use tracing::info;
use uuid::Uuid;

use super::{db_err, product_write_err, sql_offset};
use crate::domain::{
    DomainError, DomainResult, EntityMeta, Product, ProductFilter, ProductRepository,
};
use crate::infrastructure::database::entities::product;
use crate::shared::{Page, PageRequest};

fn model_to_domain(m: product::Model) -> Product {
    Product {
        meta: EntityMeta::restore(m.id, m.name, m.created_at),
        description: m.description,
        price: m.price,
        stock: m.stock,
        category_id: m.category_id,
    }
}

fn domain_to_active(p: &Product) -> product::ActiveModel {
    product::ActiveModel {
        id: Set(p.meta.id()),
        name: Set(p.meta.name.clone()),
        description: Set(p.description.clone()),
        price: Set(p.price),
        stock: Set(p.stock),
        category_id: Set(p.category_id),
        created_at: Set(p.meta.created_at()),
    }
}

fn filtered(filter: &ProductFilter) -> Select<product::Entity> {
    let mut query = product::Entity::find();
    if let Some(category_id) = filter.category_id {
        query = query.filter(product::Column::CategoryId.eq(category_id));
    }
    query
}

pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Product>> {
        let model = product::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_page(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> DomainResult<Page<Product>> {
        let total = filtered(filter).count(&self.db).await.map_err(db_err)?;
        let Some(offset) = sql_offset(page, total) else {
            return Ok(Page::from_slice(Vec::new(), total, page));
        };

        let models = filtered(filter)
            .order_by_asc(product::Column::CreatedAt)
            .order_by_asc(product::Column::Id)
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

    async fn find_by_category_ids(&self, category_ids: &[Uuid]) -> DomainResult<Vec<Product>> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = product::Entity::find()
            .filter(product::Column::CategoryId.is_in(category_ids.to_vec()))
            .order_by_asc(product::Column::CreatedAt)
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn save(&self, p: Product) -> DomainResult<Product> {
        let result = domain_to_active(&p)
            .insert(&self.db)
            .await
            .map_err(|e| product_write_err(e, p.category_id))?;
        info!(product_id = %result.id, name = %result.name, "Product saved");
        Ok(model_to_domain(result))
    }

    async fn update(&self, p: Product) -> DomainResult<Product> {
        let exists = product::Entity::find_by_id(p.meta.id())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::not_found("Product", p.meta.id()));
        }

        let result = domain_to_active(&p)
            .update(&self.db)
            .await
            .map_err(|e| product_write_err(e, p.category_id))?;
        Ok(model_to_domain(result))
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = product::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Product", id));
        }
        info!(product_id = %id, "Product deleted");
        Ok(())
    }
}
