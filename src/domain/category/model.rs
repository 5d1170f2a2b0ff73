//! Category domain entity

use crate::domain::entity::{EntityMeta, Identifiable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub meta: EntityMeta,
    pub description: Option<String>,
}

impl Category {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            meta: EntityMeta::new(name),
            description,
        }
    }
}

impl Identifiable for Category {
    fn meta(&self) -> &EntityMeta {
        &self.meta
    }
}
