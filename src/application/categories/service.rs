use std::sync::Arc;

use crate::domain::RepositoryProvider;

/// Orchestrates every category query and command.
pub struct CategoryService {
    pub(super) repos: Arc<dyn RepositoryProvider>,
}

impl CategoryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }
}
