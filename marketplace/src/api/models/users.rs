//! API request/response models for user accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::pagination::Pagination;
use super::validation::{optional, required};
use crate::db::models::users::{Role, UserCreateDBRequest, UserDBResponse};
use crate::errors::{Error, Result};

/// Query parameters for listing users
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListUsersQuery {
    pub role: Option<Role>,

    /// Exact email address
    pub email: Option<String>,

    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,
}

/// Request body for registering a user.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserCreate {
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Plain-text password; only its Argon2 hash is stored
    #[schema(format = Password)]
    pub password: String,
    /// Defaults to `buyer`
    #[schema(value_type = Option<Role>)]
    pub role: Option<String>,
    pub name: Option<String>,
}

/// Validated registration, waiting for its password to be hashed
#[derive(Debug)]
pub struct ValidatedUser {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub name: Option<String>,
}

impl UserCreate {
    pub fn validate(self) -> Result<ValidatedUser> {
        let email = required("email", &self.email)?;
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(Error::validation("email", "must be an email address")),
        }

        if self.password.is_empty() {
            return Err(Error::validation("password", "must not be empty"));
        }

        let role = match optional(self.role) {
            Some(role) => role.parse::<Role>().map_err(|e: String| Error::validation("role", e))?,
            None => Role::default(),
        };

        Ok(ValidatedUser {
            email,
            password: self.password,
            role,
            name: optional(self.name),
        })
    }
}

impl ValidatedUser {
    pub fn into_db_request(self, password_hash: String) -> UserCreateDBRequest {
        UserCreateDBRequest {
            email: self.email,
            password_hash,
            role: self.role,
            name: self.name,
        }
    }
}

/// A user as returned by the API. The password hash is never included.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub name: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserDBResponse> for UserResponse {
    fn from(db: UserDBResponse) -> Self {
        let record = db.record;
        Self {
            id: db.id,
            email: record.email,
            role: record.role,
            name: record.name,
            verified: record.verified,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
