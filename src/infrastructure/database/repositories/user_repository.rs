//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::info;
use uuid::Uuid;

use super::{db_err, sql_offset, write_err};
use crate::domain::{DomainResult, EntityMeta, Role, User, UserRepository};
use crate::infrastructure::database::entities::user;
use crate::shared::{Page, PageRequest};

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> Role {
    match role {
        user::UserRole::Admin => Role::Admin,
        user::UserRole::Customer => Role::Customer,
    }
}

fn domain_role_to_entity(role: Role) -> user::UserRole {
    match role {
        Role::Admin => user::UserRole::Admin,
        Role::Customer => user::UserRole::Customer,
    }
}

fn model_to_domain(m: user::Model) -> User {
    User {
        meta: EntityMeta::restore(m.id, m.name, m.created_at),
        email: m.email,
        password_hash: m.password_hash,
        birth_date: m.birth_date,
        role: entity_role_to_domain(m.role),
    }
}

// ── Repository implementation ───────────────────────────────────

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_page(&self, page: PageRequest) -> DomainResult<Page<User>> {
        let total = self.count().await?;

        let Some(offset) = sql_offset(page, total) else {
            return Ok(Page::from_slice(Vec::new(), total, page));
        };

        let models = user::Entity::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .offset(offset)
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Page::from_slice(
            models.into_iter().map(model_to_domain).collect(),
            total,
            page,
        ))
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn save(&self, u: User) -> DomainResult<User> {
        let model = user::ActiveModel {
            id: Set(u.meta.id()),
            name: Set(u.meta.name.clone()),
            email: Set(u.email.clone()),
            password_hash: Set(u.password_hash.clone()),
            birth_date: Set(u.birth_date),
            role: Set(domain_role_to_entity(u.role)),
            created_at: Set(u.meta.created_at()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, format!("email '{}' is already registered", u.email)))?;
        info!(user_id = %result.id, role = %u.role, "User saved");
        Ok(model_to_domain(result))
    }
}
