//! Domain layer: catalogue entities, access policy and repository interfaces.

pub mod category;
pub mod entity;
pub mod product;
pub mod repositories;
pub mod user;

pub use category::{Category, CategoryRepository};
pub use entity::{listing_order, EntityMeta, Identifiable};
pub use product::{Product, ProductFilter, ProductRepository};
pub use repositories::RepositoryProvider;
pub use user::{CreateUserDto, Policy, Role, User, UserRepository};

pub use crate::shared::{DomainError, DomainResult};
