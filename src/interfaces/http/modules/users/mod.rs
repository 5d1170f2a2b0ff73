//! Users module: user listing for administrators

pub mod handlers;

pub use handlers::*;
