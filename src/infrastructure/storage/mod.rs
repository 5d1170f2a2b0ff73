//! In-process storage used by tests and `database.url = "memory"` runs

mod memory;

pub use memory::InMemoryRepositoryProvider;
