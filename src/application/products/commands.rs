//! Product commands

use tracing::info;
use uuid::Uuid;

use super::queries::GetProductQueryResponse;
use super::service::ProductService;
use crate::domain::{DomainError, DomainResult, Identifiable, Product};

#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub stock: i32,
    pub category_id: Option<Uuid>,
}

/// Full replacement of a product's mutable fields.
#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub stock: i32,
    pub category_id: Option<Uuid>,
}

impl ProductService {
    pub async fn create_product(
        &self,
        cmd: CreateProductCommand,
    ) -> DomainResult<GetProductQueryResponse> {
        self.ensure_category_exists(cmd.category_id).await?;

        let product = Product::new(
            cmd.name.trim(),
            cmd.description,
            cmd.price,
            cmd.stock,
            cmd.category_id,
        )?;
        let saved = self.repos.products().save(product).await?;

        info!(product_id = %saved.id(), name = %saved.name(), "Product created");
        Ok(saved.into())
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        cmd: UpdateProductCommand,
    ) -> DomainResult<GetProductQueryResponse> {
        let mut product = self.find(id).await?;
        self.ensure_category_exists(cmd.category_id).await?;

        product.meta.name = cmd.name.trim().to_string();
        product.description = cmd.description;
        product.price = cmd.price;
        product.stock = cmd.stock;
        product.category_id = cmd.category_id;
        product.check_invariants()?;

        let saved = self.repos.products().update(product).await?;
        info!(product_id = %id, "Product updated");
        Ok(saved.into())
    }

    pub async fn delete_product(&self, id: Uuid) -> DomainResult<()> {
        self.repos.products().delete(id).await?;
        info!(product_id = %id, "Product deleted");
        Ok(())
    }

    async fn ensure_category_exists(&self, category_id: Option<Uuid>) -> DomainResult<()> {
        let Some(category_id) = category_id else {
            return Ok(());
        };
        if self
            .repos
            .categories()
            .find_by_id(category_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Category", category_id));
        }
        Ok(())
    }
}
