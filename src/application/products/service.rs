//! Product service

use std::sync::Arc;

use crate::domain::RepositoryProvider;

/// Orchestrates every product query and command.
///
/// HTTP handlers stay thin and delegate here.
pub struct ProductService {
    pub(super) repos: Arc<dyn RepositoryProvider>,
}

impl ProductService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }
}
