//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod category_repository;
pub mod product_repository;
pub mod repository_provider;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{DbErr, SqlErr};
use tracing::error;
use uuid::Uuid;

use crate::domain::DomainError;
use crate::shared::PageRequest;

fn db_err(e: DbErr) -> DomainError {
    error!(error = %e, "Database error");
    DomainError::Internal(format!("Database error: {}", e))
}

/// Like [`db_err`], but a unique-key violation becomes `Conflict(message)`.
fn write_err(e: DbErr, message: String) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Conflict(message),
        _ => db_err(e),
    }
}

/// Product writes: a dangling `category_id` rejected by the foreign key
/// becomes `NotFound("Category")`.
fn product_write_err(e: DbErr, category_id: Option<Uuid>) -> DomainError {
    match (e.sql_err(), category_id) {
        (Some(SqlErr::ForeignKeyConstraintViolation(_)), Some(id)) => {
            DomainError::not_found("Category", id)
        }
        _ => db_err(e),
    }
}

/// Offset to bind in SQL, or `None` when the page starts past `total` and
/// no query is needed. SQLite binds integers as `i64`.
fn sql_offset(page: PageRequest, total: u64) -> Option<u64> {
    let offset = page.offset();
    (offset < total).then(|| offset.min(i64::MAX as u64))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};
    use sea_orm_migration::MigratorTrait;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{
        Category, EntityMeta, Product, ProductFilter, RepositoryProvider, Role, User,
    };
    use crate::infrastructure::database::migrator::Migrator;
    use crate::shared::PageRequest;

    async fn setup() -> SeaOrmRepositoryProvider {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).sqlx_logging(false);
        let db: DatabaseConnection = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmRepositoryProvider::new(db)
    }

    fn product_at(name: &str, offset_secs: i64, category_id: Option<Uuid>) -> Product {
        Product {
            meta: EntityMeta::restore(
                Uuid::new_v4(),
                name,
                Utc::now() + Duration::seconds(offset_secs),
            ),
            description: None,
            price: 100,
            stock: 1,
            category_id,
        }
    }

    #[tokio::test]
    async fn ping_succeeds_on_migrated_db() {
        let repos = setup().await;
        repos.ping().await.unwrap();
    }

    #[tokio::test]
    async fn product_pages_follow_listing_order() {
        let repos = setup().await;
        for i in 0..25 {
            repos
                .products()
                .save(product_at(&format!("p{i:02}"), i, None))
                .await
                .unwrap();
        }

        let filter = ProductFilter::default();
        let page = repos
            .products()
            .find_page(&filter, PageRequest::new(3, 10).unwrap())
            .await
            .unwrap();
        let names: Vec<&str> = page.items().iter().map(|p| p.meta.name.as_str()).collect();
        assert_eq!(names, vec!["p20", "p21", "p22", "p23", "p24"]);
        assert_eq!(page.metadata().total_count, 25);
        assert!(page.metadata().has_previous_page);
        assert!(!page.metadata().has_next_page);

        let past_end = repos
            .products()
            .find_page(&filter, PageRequest::new(4, 10).unwrap())
            .await
            .unwrap();
        assert!(past_end.is_empty());
        assert_eq!(past_end.metadata().total_count, 25);
    }

    #[tokio::test]
    async fn category_filter_is_applied_before_counting() {
        let repos = setup().await;
        let books = repos
            .categories()
            .save(Category::new("Books", None))
            .await
            .unwrap();
        repos
            .products()
            .save(product_at("novel", 0, Some(books.meta.id())))
            .await
            .unwrap();
        repos.products().save(product_at("lamp", 1, None)).await.unwrap();

        let page = repos
            .products()
            .find_page(
                &ProductFilter::by_category(books.meta.id()),
                PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.metadata().total_count, 1);

        let none = repos
            .products()
            .find_page(
                &ProductFilter::by_category(Uuid::new_v4()),
                PageRequest::default(),
            )
            .await
            .unwrap();
        assert!(none.is_empty());
        assert_eq!(none.metadata().total_count, 0);
    }

    #[tokio::test]
    async fn deleting_category_detaches_its_products() {
        let repos = setup().await;
        let toys = repos
            .categories()
            .save(Category::new("Toys", None))
            .await
            .unwrap();
        let yoyo = repos
            .products()
            .save(product_at("yoyo", 0, Some(toys.meta.id())))
            .await
            .unwrap();

        repos.categories().delete(toys.meta.id()).await.unwrap();

        let reloaded = repos.products().find_by_id(yoyo.meta.id()).await.unwrap().unwrap();
        assert_eq!(reloaded.category_id, None);
        assert!(matches!(
            repos.categories().delete(toys.meta.id()).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn duplicate_category_name_is_a_conflict() {
        let repos = setup().await;
        repos.categories().save(Category::new("Garden", None)).await.unwrap();
        let err = repos
            .categories()
            .save(Category::new("Garden", Some("again".into())))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn users_round_trip_and_reject_taken_email() {
        let repos = setup().await;
        let user = User {
            meta: EntityMeta::new("Ada"),
            email: "ada@example.com".into(),
            password_hash: "hash".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 12, 10).unwrap(),
            role: Role::Admin,
        };
        repos.users().save(user.clone()).await.unwrap();
        assert_eq!(repos.users().count().await.unwrap(), 1);

        let found = repos
            .users()
            .find_by_email("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.meta.id(), user.meta.id());
        assert_eq!(found.role, Role::Admin);
        assert_eq!(found.birth_date, user.birth_date);

        let twin = User {
            meta: EntityMeta::new("Ada Twin"),
            ..user
        };
        assert!(matches!(
            repos.users().save(twin).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn update_of_missing_product_is_not_found() {
        let repos = setup().await;
        let err = repos
            .products()
            .update(product_at("ghost", 0, None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Product", .. }));
    }

    #[tokio::test]
    async fn huge_page_number_is_an_empty_page() {
        let repos = setup().await;
        repos.products().save(product_at("only", 0, None)).await.unwrap();
        repos.categories().save(Category::new("Only", None)).await.unwrap();
        let far = PageRequest::new(i64::MAX / 50, 100).unwrap();

        let products = repos
            .products()
            .find_page(&ProductFilter::default(), far)
            .await
            .unwrap();
        assert!(products.is_empty());
        assert_eq!(products.metadata().total_count, 1);
        assert!(products.metadata().has_previous_page);
        assert!(!products.metadata().has_next_page);

        let categories = repos.categories().find_page(far).await.unwrap();
        assert!(categories.is_empty());
        assert_eq!(categories.metadata().total_count, 1);

        let users = repos.users().find_page(far).await.unwrap();
        assert!(users.is_empty());
        assert!(!users.metadata().has_next_page);
    }

    #[test]
    fn sql_offset_skips_pages_past_the_end_and_fits_i64() {
        let far = PageRequest::new(i64::MAX / 50, 100).unwrap();
        assert!(far.offset() > i64::MAX as u64);
        assert_eq!(sql_offset(far, 10), None);
        assert_eq!(sql_offset(far, u64::MAX), Some(i64::MAX as u64));

        let third = PageRequest::new(3, 10).unwrap();
        assert_eq!(sql_offset(third, 25), Some(20));
        assert_eq!(sql_offset(third, 20), None);
    }

    #[tokio::test]
    async fn dangling_category_on_product_write_is_not_found() {
        let repos = setup().await;
        let ghost = Uuid::new_v4();

        let err = repos
            .products()
            .save(product_at("orphan", 0, Some(ghost)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Category", .. }));

        let mut kept = repos
            .products()
            .save(product_at("kept", 1, None))
            .await
            .unwrap();
        kept.category_id = Some(ghost);
        let err = repos.products().update(kept).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Category", .. }));
    }
}
