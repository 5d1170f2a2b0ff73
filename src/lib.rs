//! # Catalogue service
//!
//! REST backend for a product catalogue: products, categories and users,
//! with paginated listings whose metadata travels in the `X-Pagination`
//! response header.
//!
//! ## Architecture
//!
//! - **domain**: entities, access policy and repository traits
//! - **application**: use cases grouped per aggregate
//! - **infrastructure**: SeaORM/SQLite and in-memory stores, JWT and bcrypt
//! - **interfaces**: axum router, extractors and OpenAPI docs
//! - **shared**: pagination engine, error taxonomy, shutdown signal

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};

pub use interfaces::http::create_api_router;
