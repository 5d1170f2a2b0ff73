//! User domain entity

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entity::{EntityMeta, Identifiable};
use crate::shared::DomainError;

/// Authorization tier attached to every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "customer" => Ok(Self::Customer),
            other => Err(DomainError::Validation(format!("unknown role '{other}'"))),
        }
    }
}

/// User model. `meta.name` holds the display name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub meta: EntityMeta,
    pub email: String,
    pub password_hash: String,
    pub birth_date: NaiveDate,
    pub role: Role,
}

impl Identifiable for User {
    fn meta(&self) -> &EntityMeta {
        &self.meta
    }
}
