//! HTTP handlers for usage logs.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::AppState;
use crate::api::models::pagination::ItemsResponse;
use crate::api::models::system::ErrorResponse;
use crate::api::models::usage_logs::{ListUsageLogsQuery, UsageLogCreate, UsageLogResponse};
use crate::db::handlers::{Repository, UsageLogs, usage_logs::UsageLogFilter};
use crate::db::models::usage_logs::UsageLogCreateDBRequest;
use crate::errors::Result;

#[utoipa::path(
    post,
    path = "/api/usage",
    tag = "usage",
    summary = "Record usage",
    description = "Append one usage entry for a subscription. Entries are never modified.",
    request_body = UsageLogCreate,
    responses(
        (status = 200, description = "Usage recorded", body = UsageLogResponse),
        (status = 422, description = "Invalid method, status code or latency", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn record_usage(State(state): State<AppState>, Json(create): Json<UsageLogCreate>) -> Result<Json<UsageLogResponse>> {
    let request = UsageLogCreateDBRequest::try_from(create)?;
    let entry = UsageLogs::new(state.store.as_ref()).create(&request).await?;
    Ok(Json(UsageLogResponse::from(entry)))
}

#[utoipa::path(
    get,
    path = "/api/usage",
    tag = "usage",
    summary = "List usage",
    params(ListUsageLogsQuery),
    responses(
        (status = 200, description = "Matching usage entries", body = ItemsResponse<UsageLogResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_usage(State(state): State<AppState>, Query(query): Query<ListUsageLogsQuery>) -> Result<Json<ItemsResponse<UsageLogResponse>>> {
    let filter = UsageLogFilter {
        subscription_id: query.subscription_id,
        limit: query.pagination.limit(&state.config.pagination),
    };

    let entries = UsageLogs::new(state.store.as_ref()).list(&filter).await?;
    Ok(Json(ItemsResponse::new(entries.into_iter().map(UsageLogResponse::from).collect())))
}
