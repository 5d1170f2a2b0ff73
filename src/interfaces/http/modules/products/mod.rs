//! Products module: catalogue items, optionally filtered by category

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
