//! API request/response models for usage logs.

use axum::http::Method;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::pagination::Pagination;
use super::validation::{non_negative, present, required};
use crate::db::models::usage_logs::{UsageLogCreateDBRequest, UsageLogDBResponse};
use crate::errors::Error;

/// Query parameters for listing usage logs
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListUsageLogsQuery {
    pub subscription_id: Option<String>,

    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,
}

/// Request body recording one call made through a subscription.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UsageLogCreate {
    pub subscription_id: String,
    #[schema(example = "/v1/forecast")]
    pub endpoint: String,
    /// HTTP method; stored upper-cased
    #[schema(example = "GET")]
    pub method: String,
    #[schema(minimum = 100, maximum = 599, example = 200)]
    pub status_code: Option<i64>,
    #[schema(minimum = 0, example = 42)]
    pub latency_ms: Option<i64>,
}

impl TryFrom<UsageLogCreate> for UsageLogCreateDBRequest {
    type Error = Error;

    fn try_from(create: UsageLogCreate) -> Result<Self, Self::Error> {
        let subscription_id = required("subscription_id", &create.subscription_id)?;
        let endpoint = required("endpoint", &create.endpoint)?;

        let method = required("method", &create.method)?.to_ascii_uppercase();
        Method::from_bytes(method.as_bytes()).map_err(|_| Error::validation("method", "must be an HTTP method"))?;

        let status_code = present("status_code", create.status_code)?;
        let status_code = u16::try_from(status_code)
            .ok()
            .filter(|code| (100..=599).contains(code))
            .ok_or_else(|| Error::validation("status_code", "must be between 100 and 599"))?;

        let latency_ms = non_negative("latency_ms", present("latency_ms", create.latency_ms)?)?;

        Ok(Self {
            subscription_id,
            endpoint,
            method,
            status_code,
            latency_ms,
        })
    }
}

/// A usage entry as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UsageLogResponse {
    pub id: String,
    pub subscription_id: String,
    pub endpoint: String,
    pub method: String,
    pub status_code: u16,
    pub latency_ms: i64,
    pub created_at: DateTime<Utc>,
}

impl From<UsageLogDBResponse> for UsageLogResponse {
    fn from(db: UsageLogDBResponse) -> Self {
        let record = db.record;
        Self {
            id: db.id,
            subscription_id: record.subscription_id,
            endpoint: record.endpoint,
            method: record.method,
            status_code: record.status_code,
            latency_ms: record.latency_ms,
            created_at: record.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> UsageLogCreate {
        UsageLogCreate {
            subscription_id: "s1".into(),
            endpoint: "/v1/forecast".into(),
            method: "get".into(),
            status_code: Some(200),
            latency_ms: Some(12),
        }
    }

    fn field_of(create: UsageLogCreate) -> String {
        match UsageLogCreateDBRequest::try_from(create) {
            Err(Error::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_method_is_upper_cased() {
        let db = UsageLogCreateDBRequest::try_from(create()).unwrap();
        assert_eq!(db.method, "GET");
        assert_eq!(db.status_code, 200);
    }

    #[test]
    fn test_rejections_name_the_field() {
        assert_eq!(
            field_of(UsageLogCreate {
                method: "GE T".into(),
                ..create()
            }),
            "method"
        );
        assert_eq!(
            field_of(UsageLogCreate {
                status_code: Some(99),
                ..create()
            }),
            "status_code"
        );
        assert_eq!(
            field_of(UsageLogCreate {
                status_code: Some(70000),
                ..create()
            }),
            "status_code"
        );
        assert_eq!(
            field_of(UsageLogCreate {
                latency_ms: Some(-1),
                ..create()
            }),
            "latency_ms"
        );
        assert_eq!(
            field_of(UsageLogCreate {
                endpoint: "".into(),
                ..create()
            }),
            "endpoint"
        );
    }
}
