//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod storage;

pub use crypto::jwt::{JwtConfig, JwtTokenValidator};
pub use database::{init_database, run_migrations, DatabaseConfig, SeaOrmRepositoryProvider};
pub use storage::InMemoryRepositoryProvider;
