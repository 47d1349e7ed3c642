use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Stored;

pub const COLLECTION: &str = "apilisting";

/// Database request for creating a new API listing
#[derive(Debug, Clone)]
pub struct ListingCreateDBRequest {
    pub owner_id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
}

/// A listing as written to the `apilisting` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub owner_id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    pub docs_url: Option<String>,
    pub base_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub rating: f64,
    pub rating_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub type ListingDBResponse = Stored<ListingRecord>;

impl ListingCreateDBRequest {
    /// Fill server-owned fields. Rating fields start at zero and URLs start unset; callers cannot
    /// supply them at creation.
    pub fn into_record(self, now: DateTime<Utc>) -> ListingRecord {
        ListingRecord {
            owner_id: self.owner_id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            category: self.category,
            docs_url: None,
            base_url: None,
            tags: self.tags,
            rating: 0.0,
            rating_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
