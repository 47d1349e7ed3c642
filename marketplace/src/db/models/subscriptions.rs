use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Stored;

pub const COLLECTION: &str = "subscription";

/// Database request for creating a new subscription. The API key is generated by the caller.
#[derive(Debug, Clone)]
pub struct SubscriptionCreateDBRequest {
    pub user_id: String,
    pub api_id: String,
    pub plan_id: String,
    pub api_key: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// A subscription as written to the `subscription` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub user_id: String,
    pub api_id: String,
    pub plan_id: String,
    pub api_key: Option<String>,
    pub active: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub type SubscriptionDBResponse = Stored<SubscriptionRecord>;

impl SubscriptionCreateDBRequest {
    /// New subscriptions are active from the moment they are written.
    pub fn into_record(self, now: DateTime<Utc>) -> SubscriptionRecord {
        SubscriptionRecord {
            user_id: self.user_id,
            api_id: self.api_id,
            plan_id: self.plan_id,
            api_key: Some(self.api_key),
            active: true,
            started_at: Some(now),
            expires_at: self.expires_at,
            created_at: now,
            updated_at: now,
        }
    }
}
