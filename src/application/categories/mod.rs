//! Category use-cases

pub mod commands;
pub mod queries;
pub mod service;

pub use commands::{CreateCategoryCommand, UpdateCategoryCommand};
pub use queries::{GetCategoryQueryResponse, GetCategoryWithProdsQueryResponse};
pub use service::CategoryService;
