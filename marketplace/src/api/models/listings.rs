//! API request/response models for API listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::pagination::Pagination;
use super::validation::{labels, required};
use crate::db::models::listings::{ListingCreateDBRequest, ListingDBResponse};
use crate::errors::Error;

/// Query parameters for listing API listings
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListListingsQuery {
    /// Case-insensitive substring to look for in the title
    pub q: Option<String>,

    /// Exact category (case-sensitive)
    pub category: Option<String>,

    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,
}

/// Request body for publishing a new listing.
///
/// Rating fields and URLs are server-managed; values for them in the body are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ListingCreate {
    /// ID of the seller publishing the listing
    #[schema(example = "6650f1c2a1b2c3d4e5f60718")]
    pub owner_id: String,
    #[schema(example = "Weather API")]
    pub title: String,
    /// URL-friendly name. Not required to be unique.
    #[schema(example = "weather-api")]
    pub slug: String,
    pub description: String,
    #[schema(example = "data")]
    pub category: String,
    pub tags: Option<Vec<String>>,
}

impl TryFrom<ListingCreate> for ListingCreateDBRequest {
    type Error = Error;

    fn try_from(create: ListingCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            owner_id: required("owner_id", &create.owner_id)?,
            title: required("title", &create.title)?,
            slug: required("slug", &create.slug)?,
            description: required("description", &create.description)?,
            category: required("category", &create.category)?,
            tags: labels(create.tags),
        })
    }
}

/// A listing as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListingResponse {
    /// Store-assigned identifier
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    pub docs_url: Option<String>,
    pub base_url: Option<String>,
    pub tags: Vec<String>,
    /// Average rating in [0, 5]
    pub rating: f64,
    pub rating_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ListingDBResponse> for ListingResponse {
    fn from(db: ListingDBResponse) -> Self {
        let record = db.record;
        Self {
            id: db.id,
            owner_id: record.owner_id,
            title: record.title,
            slug: record.slug,
            description: record.description,
            category: record.category,
            docs_url: record.docs_url,
            base_url: record.base_url,
            tags: record.tags,
            rating: record.rating,
            rating_count: record.rating_count,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_ignores_server_managed_fields() {
        let create: ListingCreate = serde_json::from_value(json!({
            "owner_id": "o1",
            "title": "Weather API",
            "slug": "weather",
            "description": "Forecasts",
            "category": "data",
            "docs_url": "https://evil.example",
            "rating": 5.0,
            "rating_count": 1000,
        }))
        .unwrap();

        let db = ListingCreateDBRequest::try_from(create).unwrap();
        assert_eq!(db.title, "Weather API");
        assert!(db.tags.is_empty());
    }

    #[test]
    fn test_create_reports_first_missing_field() {
        let create: ListingCreate = serde_json::from_value(json!({
            "owner_id": "o1",
            "title": "Weather API",
            "description": "Forecasts",
            "category": "data",
        }))
        .unwrap();

        match ListingCreateDBRequest::try_from(create) {
            Err(Error::Validation { field, .. }) => assert_eq!(field, "slug"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_null_tags_become_empty() {
        let create: ListingCreate = serde_json::from_value(json!({
            "owner_id": "o1",
            "title": "t",
            "slug": "s",
            "description": "d",
            "category": "c",
            "tags": null,
        }))
        .unwrap();
        assert!(ListingCreateDBRequest::try_from(create).unwrap().tags.is_empty());
    }
}
