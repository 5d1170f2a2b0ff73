//! Authentication module: login, registration and the current-user profile

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
