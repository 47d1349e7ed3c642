//! API request/response models for subscriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

use super::pagination::Pagination;
use super::validation::required;
use crate::db::models::subscriptions::{SubscriptionCreateDBRequest, SubscriptionDBResponse};
use crate::errors::{Error, Result};

/// Query parameters for listing subscriptions
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListSubscriptionsQuery {
    pub user_id: Option<String>,
    pub api_id: Option<String>,

    /// Only active (`true`) or inactive (`false`) subscriptions
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub active: Option<bool>,

    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,
}

/// Request body for subscribing to a plan.
///
/// References are not checked against existing users, listings or plans.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SubscriptionCreate {
    pub user_id: String,
    pub api_id: String,
    pub plan_id: String,
    /// Optional expiry; must be in the future
    pub expires_at: Option<DateTime<Utc>>,
}

/// Validated subscription, waiting for its API key
#[derive(Debug)]
pub struct ValidatedSubscription {
    user_id: String,
    api_id: String,
    plan_id: String,
    expires_at: Option<DateTime<Utc>>,
}

impl SubscriptionCreate {
    pub fn validate(self, now: DateTime<Utc>) -> Result<ValidatedSubscription> {
        let user_id = required("user_id", &self.user_id)?;
        let api_id = required("api_id", &self.api_id)?;
        let plan_id = required("plan_id", &self.plan_id)?;

        if let Some(expires_at) = self.expires_at
            && expires_at <= now
        {
            return Err(Error::validation("expires_at", "must be in the future"));
        }

        Ok(ValidatedSubscription {
            user_id,
            api_id,
            plan_id,
            expires_at: self.expires_at,
        })
    }
}

impl ValidatedSubscription {
    pub fn into_db_request(self, api_key: String) -> SubscriptionCreateDBRequest {
        SubscriptionCreateDBRequest {
            user_id: self.user_id,
            api_id: self.api_id,
            plan_id: self.plan_id,
            api_key,
            expires_at: self.expires_at,
        }
    }
}

/// A subscription as returned by the API, including its API key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionResponse {
    pub id: String,
    pub user_id: String,
    pub api_id: String,
    pub plan_id: String,
    /// Key for calling the subscribed API (`sk-...`)
    pub api_key: Option<String>,
    pub active: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SubscriptionDBResponse> for SubscriptionResponse {
    fn from(db: SubscriptionDBResponse) -> Self {
        let record = db.record;
        Self {
            id: db.id,
            user_id: record.user_id,
            api_id: record.api_id,
            plan_id: record.plan_id,
            api_key: record.api_key,
            active: record.active,
            started_at: record.started_at,
            expires_at: record.expires_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
