//! Product aggregate
//!
//! Contains the Product entity, its listing filter, and repository interface.

pub mod model;
pub mod repository;

pub use model::Product;
pub use repository::{ProductFilter, ProductRepository};
