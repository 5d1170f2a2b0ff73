//! Product use-cases
//!
//! Read side (`queries`) returns response projections; write side
//! (`commands`) validates references before touching storage.

pub mod commands;
pub mod queries;
pub mod service;

pub use commands::{CreateProductCommand, UpdateProductCommand};
pub use queries::{GetProductQueryResponse, GetProductWithCatQueryResponse};
pub use service::ProductService;
