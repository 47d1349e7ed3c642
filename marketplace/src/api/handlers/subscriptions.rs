//! HTTP handlers for subscriptions.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;

use crate::AppState;
use crate::api::models::pagination::ItemsResponse;
use crate::api::models::subscriptions::{ListSubscriptionsQuery, SubscriptionCreate, SubscriptionResponse};
use crate::api::models::system::ErrorResponse;
use crate::crypto;
use crate::db::handlers::{Repository, Subscriptions, subscriptions::SubscriptionFilter};
use crate::errors::Result;

#[utoipa::path(
    post,
    path = "/api/subscriptions",
    tag = "subscriptions",
    summary = "Subscribe",
    description = "Subscribe a user to a plan. The subscription starts active immediately and is issued a fresh `sk-` API key.",
    request_body = SubscriptionCreate,
    responses(
        (status = 200, description = "Subscription created", body = SubscriptionResponse),
        (status = 422, description = "Missing reference or expiry in the past", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_subscription(
    State(state): State<AppState>,
    Json(create): Json<SubscriptionCreate>,
) -> Result<Json<SubscriptionResponse>> {
    let subscription = create.validate(Utc::now())?;
    let request = subscription.into_db_request(crypto::generate_api_key());

    let created = Subscriptions::new(state.store.as_ref()).create(&request).await?;
    Ok(Json(SubscriptionResponse::from(created)))
}

#[utoipa::path(
    get,
    path = "/api/subscriptions",
    tag = "subscriptions",
    summary = "List subscriptions",
    params(ListSubscriptionsQuery),
    responses(
        (status = 200, description = "Matching subscriptions", body = ItemsResponse<SubscriptionResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_subscriptions(
    State(state): State<AppState>,
    Query(query): Query<ListSubscriptionsQuery>,
) -> Result<Json<ItemsResponse<SubscriptionResponse>>> {
    let filter = SubscriptionFilter {
        user_id: query.user_id,
        api_id: query.api_id,
        active: query.active,
        limit: query.pagination.limit(&state.config.pagination),
    };

    let subscriptions = Subscriptions::new(state.store.as_ref()).list(&filter).await?;
    Ok(Json(ItemsResponse::new(
        subscriptions.into_iter().map(SubscriptionResponse::from).collect(),
    )))
}
