use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Stored;

pub const COLLECTION: &str = "user";

/// Account role. New accounts are buyers unless stated otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Buyer,
    Seller,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
            Role::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(Role::Buyer),
            "seller" => Ok(Role::Seller),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{other}', expected one of buyer, seller, admin")),
        }
    }
}

/// Database request for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub name: Option<String>,
}

/// A user as written to the `user` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub name: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub type UserDBResponse = Stored<UserRecord>;

impl UserCreateDBRequest {
    pub fn into_record(self, now: DateTime<Utc>) -> UserRecord {
        UserRecord {
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
            name: self.name,
            verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}
