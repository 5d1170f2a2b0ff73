//! Product domain entity

use uuid::Uuid;

use crate::domain::entity::{EntityMeta, Identifiable};
use crate::shared::{DomainError, DomainResult};

/// A sellable item, optionally filed under one [`Category`](crate::domain::Category).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub meta: EntityMeta,
    pub description: Option<String>,
    /// Price in the smallest currency unit (e.g., cents)
    pub price: i64,
    pub stock: i32,
    pub category_id: Option<Uuid>,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        price: i64,
        stock: i32,
        category_id: Option<Uuid>,
    ) -> DomainResult<Self> {
        let product = Self {
            meta: EntityMeta::new(name),
            description,
            price,
            stock,
            category_id,
        };
        product.check_invariants()?;
        Ok(product)
    }

    /// Field-level rules that hold for every stored product.
    ///
    /// Whether `category_id` resolves is checked by the caller, which has
    /// access to the category repository.
    pub fn check_invariants(&self) -> DomainResult<()> {
        if self.meta.name.trim().is_empty() {
            return Err(DomainError::Validation("name must not be empty".into()));
        }
        if self.price < 0 {
            return Err(DomainError::Validation("price must be non-negative".into()));
        }
        if self.stock < 0 {
            return Err(DomainError::Validation("stock must be non-negative".into()));
        }
        Ok(())
    }
}

impl Identifiable for Product {
    fn meta(&self) -> &EntityMeta {
        &self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_product_keeps_fields() {
        let category = Uuid::new_v4();
        let p = Product::new("Kettle", None, 2999, 4, Some(category)).unwrap();
        assert_eq!(p.name(), "Kettle");
        assert_eq!(p.price, 2999);
        assert_eq!(p.category_id, Some(category));
    }

    #[test]
    fn rejects_blank_name() {
        assert!(matches!(
            Product::new("   ", None, 1, 1, None),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn rejects_negative_price_and_stock() {
        assert!(Product::new("A", None, -1, 0, None).is_err());
        assert!(Product::new("A", None, 0, -1, None).is_err());
        assert!(Product::new("A", None, 0, 0, None).is_ok());
    }
}
