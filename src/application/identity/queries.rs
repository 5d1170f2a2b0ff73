//! User projection returned by the user endpoints. Never carries the password hash.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Identifiable, Role, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetUserQueryResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for GetUserQueryResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id(),
            created_at: u.created_at(),
            name: u.meta.name,
            email: u.email,
            birth_date: u.birth_date,
            role: u.role,
        }
    }
}
