use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Stored;

pub const COLLECTION: &str = "review";

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Database request for creating a new review. `rating` is already within bounds.
#[derive(Debug, Clone)]
pub struct ReviewCreateDBRequest {
    pub user_id: String,
    pub api_id: String,
    pub rating: i64,
    pub comment: Option<String>,
}

/// A review as written to the `review` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub user_id: String,
    pub api_id: String,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub type ReviewDBResponse = Stored<ReviewRecord>;

impl ReviewCreateDBRequest {
    pub fn into_record(self, now: DateTime<Utc>) -> ReviewRecord {
        ReviewRecord {
            user_id: self.user_id,
            api_id: self.api_id,
            rating: self.rating,
            comment: self.comment,
            created_at: now,
            updated_at: now,
        }
    }
}
