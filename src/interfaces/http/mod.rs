//! HTTP REST API interfaces
//!
//! - `common`: error body, pagination header, extractors
//! - `middleware`: bearer authentication + role policy
//! - `modules`: handlers per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;


pub use router::{create_api_router, ApiDoc, AppState};
