//! User aggregate
//!
//! Contains the User entity, its role and access policy, and repository interface.

pub mod model;
pub mod policy;
pub mod repository;

mod dto_create;

pub use model::{Role, User};
pub use policy::Policy;

pub use dto_create::CreateUserDto;

pub use repository::UserRepository;
