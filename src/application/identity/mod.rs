//! Identity module: user management & authentication
//!
//! Contains the `UserService` which orchestrates login, registration,
//! user listing and the startup admin bootstrap.

pub mod queries;
pub mod service;

pub use queries::GetUserQueryResponse;
pub use service::{AuthResult, UserService};
