//! Category commands

use tracing::info;
use uuid::Uuid;

use super::queries::GetCategoryQueryResponse;
use super::service::CategoryService;
use crate::domain::{Category, DomainError, DomainResult, Identifiable};

#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateCategoryCommand {
    pub name: String,
    pub description: Option<String>,
}

fn normalized_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::Validation("name must not be empty".into()));
    }
    Ok(name.to_string())
}

impl CategoryService {
    /// Create a category. Names are unique.
    pub async fn create_category(
        &self,
        cmd: CreateCategoryCommand,
    ) -> DomainResult<GetCategoryQueryResponse> {
        let name = normalized_name(&cmd.name)?;
        if self.repos.categories().find_by_name(&name).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "category '{name}' already exists"
            )));
        }

        let saved = self
            .repos
            .categories()
            .save(Category::new(name, cmd.description))
            .await?;
        info!(category_id = %saved.id(), name = %saved.name(), "Category created");
        Ok(saved.into())
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        cmd: UpdateCategoryCommand,
    ) -> DomainResult<GetCategoryQueryResponse> {
        let mut category = self.find(id).await?;
        category.meta.name = normalized_name(&cmd.name)?;
        category.description = cmd.description;

        let saved = self.repos.categories().update(category).await?;
        info!(category_id = %id, "Category updated");
        Ok(saved.into())
    }

    /// Delete a category. Its products stay, uncategorised.
    pub async fn delete_category(&self, id: Uuid) -> DomainResult<()> {
        self.repos.categories().delete(id).await?;
        info!(category_id = %id, "Category deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::{EntityMeta, Product, RepositoryProvider};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use crate::shared::PageRequest;

    fn service() -> (CategoryService, Arc<InMemoryRepositoryProvider>) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        (CategoryService::new(repos.clone()), repos)
    }

    fn create(name: &str) -> CreateCategoryCommand {
        CreateCategoryCommand {
            name: name.into(),
            description: None,
        }
    }

    async fn add_product(
        repos: &InMemoryRepositoryProvider,
        name: &str,
        order: i64,
        category: Uuid,
    ) {
        let product = Product {
            meta: EntityMeta::restore(Uuid::new_v4(), name, Utc::now() + Duration::seconds(order)),
            description: None,
            price: 1,
            stock: 1,
            category_id: Some(category),
        };
        repos.products().save(product).await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_names_conflict() {
        let (svc, _) = service();
        svc.create_category(create("Books")).await.unwrap();
        assert!(matches!(
            svc.create_category(create(" Books ")).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn blank_name_is_invalid() {
        let (svc, _) = service();
        assert!(matches!(
            svc.create_category(create("  ")).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn update_and_delete_missing_category_is_not_found() {
        let (svc, _) = service();
        let id = Uuid::new_v4();
        assert!(matches!(
            svc.update_category(id, UpdateCategoryCommand { name: "X".into(), description: None })
                .await,
            Err(DomainError::NotFound { entity: "Category", .. })
        ));
        assert!(matches!(
            svc.delete_category(id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn with_products_groups_by_category() {
        let (svc, repos) = service();
        let books = svc.create_category(create("Books")).await.unwrap();
        let games = svc.create_category(create("Games")).await.unwrap();
        add_product(&repos, "Novel", 0, books.id).await;
        add_product(&repos, "Atlas", 1, books.id).await;
        add_product(&repos, "Chess", 2, games.id).await;

        let one = svc.get_category_with_products(books.id).await.unwrap();
        let names: Vec<&str> = one.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Novel", "Atlas"]);

        let page = svc
            .list_categories_with_products(PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.metadata().total_count, 2);
        let counts: Vec<(String, usize)> = page
            .items()
            .iter()
            .map(|c| (c.name.clone(), c.products.len()))
            .collect();
        assert!(counts.contains(&("Books".to_string(), 2)));
        assert!(counts.contains(&("Games".to_string(), 1)));
    }

    #[tokio::test]
    async fn empty_category_has_no_products() {
        let (svc, _) = service();
        let empty = svc.create_category(create("Empty")).await.unwrap();
        let with = svc.get_category_with_products(empty.id).await.unwrap();
        assert!(with.products.is_empty());
    }
}
