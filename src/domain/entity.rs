//! Identity shared by every catalogue record
//!
//! Records embed an [`EntityMeta`] instead of inheriting from a base type and
//! expose it through the [`Identifiable`] capability.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identity, display name and creation time of a record.
///
/// `id` and `created_at` are fixed at construction; only `name` may change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMeta {
    id: Uuid,
    pub name: String,
    created_at: DateTime<Utc>,
}

impl EntityMeta {
    /// Assign a fresh identity stamped with the current time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// Rebuild the metadata of a record loaded from storage.
    pub fn restore(id: Uuid, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

pub trait Identifiable {
    fn meta(&self) -> &EntityMeta;

    fn id(&self) -> Uuid {
        self.meta().id()
    }

    fn name(&self) -> &str {
        &self.meta().name
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.meta().created_at()
    }
}

/// Listing order for every collection: oldest first, ties broken by id.
pub fn listing_order<T: Identifiable>(a: &T, b: &T) -> Ordering {
    a.created_at()
        .cmp(&b.created_at())
        .then_with(|| a.id().cmp(&b.id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    struct Named(EntityMeta);

    impl Identifiable for Named {
        fn meta(&self) -> &EntityMeta {
            &self.0
        }
    }

    #[test]
    fn new_meta_gets_unique_ids() {
        let a = EntityMeta::new("a");
        let b = EntityMeta::new("b");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn listing_order_uses_created_at_then_id() {
        let t = Utc::now();
        let low = Uuid::from_u128(1);
        let high = Uuid::from_u128(2);

        let mut items = vec![
            Named(EntityMeta::restore(high, "late", t + Duration::seconds(5))),
            Named(EntityMeta::restore(high, "tie-high", t)),
            Named(EntityMeta::restore(low, "tie-low", t)),
        ];
        items.sort_by(listing_order);

        let names: Vec<&str> = items.iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["tie-low", "tie-high", "late"]);
    }
}
