//! Shared pagination types for list endpoints.
//!
//! List endpoints return at most `limit` items in insertion order. There is no offset or cursor.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

use crate::config::PaginationConfig;

/// The `limit` query parameter shared by all list endpoints.
///
/// The effective limit is clamped to `[1, max_limit]`, so zero or negative values return one
/// item and oversized values return at most `max_limit`.
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct Pagination {
    /// Maximum number of items to return (default: 20, max: 100)
    #[param(default = 20, minimum = 1, maximum = 100)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub limit: Option<i64>,
}

impl Pagination {
    /// Get the limit value, clamped between 1 and the configured maximum.
    /// Defaults to the configured default if not specified.
    #[inline]
    pub fn limit(&self, config: &PaginationConfig) -> usize {
        let max = i64::try_from(config.max_limit).unwrap_or(i64::MAX).max(1);
        let requested = self
            .limit
            .unwrap_or_else(|| i64::try_from(config.default_limit).unwrap_or(max));
        // clamp keeps the value within [1, max], so the conversion cannot fail
        usize::try_from(requested.clamp(1, max)).unwrap_or(1)
    }
}

/// Envelope for list responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemsResponse<T: ToSchema> {
    /// Matching items in insertion order
    pub items: Vec<T>,
}

impl<T: ToSchema> ItemsResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }
}
