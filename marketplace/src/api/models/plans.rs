//! API request/response models for plans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::pagination::Pagination;
use super::validation::{labels, non_negative, present, required};
use crate::db::models::plans::{BillingCycle, PlanCreateDBRequest, PlanDBResponse};
use crate::errors::Error;

/// Query parameters for listing plans
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListPlansQuery {
    /// Listing the plans belong to
    pub api_id: Option<String>,

    pub billing_cycle: Option<BillingCycle>,

    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,
}

/// Request body for creating a plan.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct PlanCreate {
    pub api_id: String,
    #[schema(example = "Starter")]
    pub name: String,
    /// Price in cents; must not be negative
    #[schema(example = 999)]
    pub price_cents: Option<i64>,
    #[schema(value_type = BillingCycle)]
    pub billing_cycle: Option<String>,
    /// Requests per minute (default 60)
    pub per_minute_limit: Option<i64>,
    /// Requests per month (default 10000)
    pub monthly_quota: Option<i64>,
    pub features: Option<Vec<String>>,
}

impl TryFrom<PlanCreate> for PlanCreateDBRequest {
    type Error = Error;

    fn try_from(create: PlanCreate) -> Result<Self, Self::Error> {
        let api_id = required("api_id", &create.api_id)?;
        let name = required("name", &create.name)?;
        let price_cents = non_negative("price_cents", present("price_cents", create.price_cents)?)?;
        let billing_cycle = present("billing_cycle", create.billing_cycle)?
            .trim()
            .parse::<BillingCycle>()
            .map_err(|e: String| Error::validation("billing_cycle", e))?;

        let per_minute_limit = create
            .per_minute_limit
            .map(|v| non_negative("per_minute_limit", v))
            .transpose()?;
        let monthly_quota = create.monthly_quota.map(|v| non_negative("monthly_quota", v)).transpose()?;

        Ok(Self {
            api_id,
            name,
            price_cents,
            billing_cycle,
            per_minute_limit,
            monthly_quota,
            features: labels(create.features),
        })
    }
}

/// A plan as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlanResponse {
    pub id: String,
    pub api_id: String,
    pub name: String,
    pub price_cents: i64,
    pub billing_cycle: BillingCycle,
    pub per_minute_limit: i64,
    pub monthly_quota: i64,
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PlanDBResponse> for PlanResponse {
    fn from(db: PlanDBResponse) -> Self {
        let record = db.record;
        Self {
            id: db.id,
            api_id: record.api_id,
            name: record.name,
            price_cents: record.price_cents,
            billing_cycle: record.billing_cycle,
            per_minute_limit: record.per_minute_limit,
            monthly_quota: record.monthly_quota,
            features: record.features,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
