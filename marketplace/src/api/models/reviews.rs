//! API request/response models for reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::pagination::Pagination;
use super::validation::{optional, present, required};
use crate::db::models::reviews::{MAX_RATING, MIN_RATING, ReviewCreateDBRequest, ReviewDBResponse};
use crate::errors::Error;

/// Query parameters for listing reviews
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListReviewsQuery {
    /// Listing the reviews are about
    pub api_id: Option<String>,
    /// Author of the reviews
    pub user_id: Option<String>,

    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,
}

/// Request body for reviewing a listing.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ReviewCreate {
    pub user_id: String,
    pub api_id: String,
    /// Whole stars from 1 to 5
    #[schema(minimum = 1, maximum = 5, example = 4)]
    pub rating: Option<i64>,
    pub comment: Option<String>,
}

impl TryFrom<ReviewCreate> for ReviewCreateDBRequest {
    type Error = Error;

    fn try_from(create: ReviewCreate) -> Result<Self, Self::Error> {
        let user_id = required("user_id", &create.user_id)?;
        let api_id = required("api_id", &create.api_id)?;
        let rating = present("rating", create.rating)?;
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(Error::validation(
                "rating",
                format!("must be between {MIN_RATING} and {MAX_RATING}"),
            ));
        }

        Ok(Self {
            user_id,
            api_id,
            rating,
            comment: optional(create.comment),
        })
    }
}

/// A review as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: String,
    pub user_id: String,
    pub api_id: String,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ReviewDBResponse> for ReviewResponse {
    fn from(db: ReviewDBResponse) -> Self {
        let record = db.record;
        Self {
            id: db.id,
            user_id: record.user_id,
            api_id: record.api_id,
            rating: record.rating,
            comment: record.comment,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
