//! HTTP handlers for reviews.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::AppState;
use crate::api::models::pagination::ItemsResponse;
use crate::api::models::reviews::{ListReviewsQuery, ReviewCreate, ReviewResponse};
use crate::api::models::system::ErrorResponse;
use crate::db::handlers::{Repository, Reviews, reviews::ReviewFilter};
use crate::db::models::reviews::ReviewCreateDBRequest;
use crate::errors::Result;

#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "reviews",
    summary = "Review a listing",
    description = "Record a 1-5 star rating with an optional comment. The listing's own rating fields are not recomputed.",
    request_body = ReviewCreate,
    responses(
        (status = 200, description = "Review created", body = ReviewResponse),
        (status = 422, description = "Rating outside 1-5 or missing reference", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_review(State(state): State<AppState>, Json(create): Json<ReviewCreate>) -> Result<Json<ReviewResponse>> {
    let request = ReviewCreateDBRequest::try_from(create)?;
    let review = Reviews::new(state.store.as_ref()).create(&request).await?;
    Ok(Json(ReviewResponse::from(review)))
}

#[utoipa::path(
    get,
    path = "/api/reviews",
    tag = "reviews",
    summary = "List reviews",
    params(ListReviewsQuery),
    responses(
        (status = 200, description = "Matching reviews", body = ItemsResponse<ReviewResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_reviews(State(state): State<AppState>, Query(query): Query<ListReviewsQuery>) -> Result<Json<ItemsResponse<ReviewResponse>>> {
    let filter = ReviewFilter {
        api_id: query.api_id,
        user_id: query.user_id,
        limit: query.pagination.limit(&state.config.pagination),
    };

    let reviews = Reviews::new(state.store.as_ref()).list(&filter).await?;
    Ok(Json(ItemsResponse::new(reviews.into_iter().map(ReviewResponse::from).collect())))
}
