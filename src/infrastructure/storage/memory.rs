//! In-memory repository provider
//!
//! Mirrors the SQL-backed repositories: same listing order, filters applied
//! before pagination, unique category names and user emails, and deleting a
//! category detaches its products.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{
    listing_order, Category, CategoryRepository, DomainError, DomainResult, Identifiable,
    Product, ProductFilter, ProductRepository, RepositoryProvider, User, UserRepository,
};
use crate::shared::{paginate, Page, PageRequest};

#[derive(Default)]
struct Tables {
    categories: DashMap<Uuid, Category>,
    category_names: DashMap<String, Uuid>,
    products: DashMap<Uuid, Product>,
    users: DashMap<Uuid, User>,
    user_emails: DashMap<String, Uuid>,
}

/// Snapshot of a map's values in listing order.
fn sorted<T: Identifiable + Clone>(map: &DashMap<Uuid, T>, keep: impl Fn(&T) -> bool) -> Vec<T> {
    let mut items: Vec<T> = map
        .iter()
        .filter(|e| keep(e.value()))
        .map(|e| e.value().clone())
        .collect();
    items.sort_by(listing_order);
    items
}

/// Claim `key` in a unique index for `owner`. Re-claiming one's own key is fine.
fn claim(index: &DashMap<String, Uuid>, key: &str, owner: Uuid) -> bool {
    match index.entry(key.to_string()) {
        Entry::Occupied(e) => *e.get() == owner,
        Entry::Vacant(e) => {
            e.insert(owner);
            true
        }
    }
}

// ── Categories ──────────────────────────────────────────────────

pub struct InMemoryCategoryRepository {
    tables: Arc<Tables>,
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Category>> {
        Ok(self.tables.categories.get(&id).map(|c| c.clone()))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Category>> {
        let id = self.tables.category_names.get(name).map(|e| *e.value());
        Ok(id.and_then(|id| self.tables.categories.get(&id).map(|c| c.clone())))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<Category>> {
        Ok(sorted(&self.tables.categories, |c| ids.contains(&c.id())))
    }

    async fn find_page(&self, page: PageRequest) -> DomainResult<Page<Category>> {
        Ok(paginate(&sorted(&self.tables.categories, |_| true), page))
    }

    async fn save(&self, category: Category) -> DomainResult<Category> {
        let id = category.id();
        if !claim(&self.tables.category_names, &category.meta.name, id) {
            return Err(DomainError::Conflict(format!(
                "category '{}' already exists",
                category.meta.name
            )));
        }
        self.tables.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn update(&self, category: Category) -> DomainResult<Category> {
        let id = category.id();
        let previous_name = match self.tables.categories.get(&id) {
            Some(existing) => existing.meta.name.clone(),
            None => return Err(DomainError::not_found("Category", id)),
        };

        if previous_name != category.meta.name {
            if !claim(&self.tables.category_names, &category.meta.name, id) {
                return Err(DomainError::Conflict(format!(
                    "category '{}' already exists",
                    category.meta.name
                )));
            }
            self.tables.category_names.remove(&previous_name);
        }

        self.tables.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let Some((_, removed)) = self.tables.categories.remove(&id) else {
            return Err(DomainError::not_found("Category", id));
        };
        self.tables.category_names.remove(&removed.meta.name);

        for mut product in self.tables.products.iter_mut() {
            if product.category_id == Some(id) {
                product.category_id = None;
            }
        }
        Ok(())
    }
}

// ── Products ────────────────────────────────────────────────────

pub struct InMemoryProductRepository {
    tables: Arc<Tables>,
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Product>> {
        Ok(self.tables.products.get(&id).map(|p| p.clone()))
    }

    async fn find_page(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> DomainResult<Page<Product>> {
        let matching = sorted(&self.tables.products, |p| filter.matches(p));
        Ok(paginate(&matching, page))
    }

    async fn find_by_category_ids(&self, category_ids: &[Uuid]) -> DomainResult<Vec<Product>> {
        Ok(sorted(&self.tables.products, |p| {
            p.category_id.is_some_and(|id| category_ids.contains(&id))
        }))
    }

    async fn save(&self, product: Product) -> DomainResult<Product> {
        self.tables.products.insert(product.id(), product.clone());
        Ok(product)
    }

    async fn update(&self, product: Product) -> DomainResult<Product> {
        match self.tables.products.get_mut(&product.id()) {
            Some(mut slot) => {
                *slot = product.clone();
                Ok(product)
            }
            None => Err(DomainError::not_found("Product", product.id())),
        }
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.tables
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Product", id))
    }
}

// ── Users ───────────────────────────────────────────────────────

pub struct InMemoryUserRepository {
    tables: Arc<Tables>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        Ok(self.tables.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let id = self.tables.user_emails.get(email).map(|e| *e.value());
        Ok(id.and_then(|id| self.tables.users.get(&id).map(|u| u.clone())))
    }

    async fn find_page(&self, page: PageRequest) -> DomainResult<Page<User>> {
        Ok(paginate(&sorted(&self.tables.users, |_| true), page))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.tables.users.len() as u64)
    }

    async fn save(&self, user: User) -> DomainResult<User> {
        if !claim(&self.tables.user_emails, &user.email, user.id()) {
            return Err(DomainError::Conflict(format!(
                "email '{}' is already registered",
                user.email
            )));
        }
        self.tables.users.insert(user.id(), user.clone());
        Ok(user)
    }
}

// ── Provider ────────────────────────────────────────────────────

/// [`RepositoryProvider`] over process memory. Data lives as long as the provider.
pub struct InMemoryRepositoryProvider {
    categories: InMemoryCategoryRepository,
    products: InMemoryProductRepository,
    users: InMemoryUserRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        let tables = Arc::new(Tables::default());
        Self {
            categories: InMemoryCategoryRepository {
                tables: tables.clone(),
            },
            products: InMemoryProductRepository {
                tables: tables.clone(),
            },
            users: InMemoryUserRepository { tables },
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepositoryProvider for InMemoryRepositoryProvider {
    fn categories(&self) -> &dyn CategoryRepository {
        &self.categories
    }

    fn products(&self) -> &dyn ProductRepository {
        &self.products
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    async fn ping(&self) -> DomainResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::EntityMeta;

    fn product_at(name: &str, offset_secs: i64, category_id: Option<Uuid>) -> Product {
        Product {
            meta: EntityMeta::restore(
                Uuid::new_v4(),
                name,
                Utc::now() + Duration::seconds(offset_secs),
            ),
            description: None,
            price: 10,
            stock: 1,
            category_id,
        }
    }

    #[tokio::test]
    async fn pages_come_back_in_listing_order() {
        let repos = InMemoryRepositoryProvider::new();
        // Inserted newest first; listing must still be oldest first.
        for i in (0..25).rev() {
            repos
                .products()
                .save(product_at(&format!("p{i:02}"), i, None))
                .await
                .unwrap();
        }

        let first = repos
            .products()
            .find_page(&ProductFilter::default(), PageRequest::new(1, 10).unwrap())
            .await
            .unwrap();
        assert_eq!(first.items()[0].meta.name, "p00");
        assert_eq!(first.items()[9].meta.name, "p09");
        assert!(first.metadata().has_next_page);
        assert!(!first.metadata().has_previous_page);
    }

    #[tokio::test]
    async fn filter_counts_only_matching_products() {
        let repos = InMemoryRepositoryProvider::new();
        let tools = repos
            .categories()
            .save(Category::new("Tools", None))
            .await
            .unwrap();
        for i in 0..3 {
            repos
                .products()
                .save(product_at(&format!("t{i}"), i, Some(tools.id())))
                .await
                .unwrap();
        }
        repos.products().save(product_at("other", 9, None)).await.unwrap();

        let page = repos
            .products()
            .find_page(&ProductFilter::by_category(tools.id()), PageRequest::new(1, 2).unwrap())
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.metadata().total_count, 3);
        assert!(page.metadata().has_next_page);
    }

    #[tokio::test]
    async fn category_names_stay_unique_across_renames() {
        let repos = InMemoryRepositoryProvider::new();
        let a = repos.categories().save(Category::new("A", None)).await.unwrap();
        let b = repos.categories().save(Category::new("B", None)).await.unwrap();

        assert!(matches!(
            repos.categories().save(Category::new("A", None)).await,
            Err(DomainError::Conflict(_))
        ));

        let mut renamed = b.clone();
        renamed.meta.name = "A".into();
        assert!(matches!(
            repos.categories().update(renamed).await,
            Err(DomainError::Conflict(_))
        ));

        let mut renamed = a.clone();
        renamed.meta.name = "C".into();
        repos.categories().update(renamed).await.unwrap();
        assert!(repos.categories().find_by_name("A").await.unwrap().is_none());
        repos.categories().save(Category::new("A", None)).await.unwrap();
    }

    #[tokio::test]
    async fn deleting_category_detaches_products() {
        let repos = InMemoryRepositoryProvider::new();
        let c = repos.categories().save(Category::new("C", None)).await.unwrap();
        let p = repos
            .products()
            .save(product_at("p", 0, Some(c.id())))
            .await
            .unwrap();

        repos.categories().delete(c.id()).await.unwrap();
        let p = repos.products().find_by_id(p.id()).await.unwrap().unwrap();
        assert_eq!(p.category_id, None);
        assert!(repos.categories().find_by_name("C").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let repos = InMemoryRepositoryProvider::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            repos.products().delete(id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            repos.categories().delete(id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(repos.users().find_by_id(id).await.unwrap().is_none());
    }
}
