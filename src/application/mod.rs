//! Application layer: use-cases over the domain repositories

pub mod categories;
pub mod identity;
pub mod ports;
pub mod products;

pub use categories::CategoryService;
pub use identity::UserService;
pub use ports::{AuthError, Principal, TokenValidator};
pub use products::ProductService;
