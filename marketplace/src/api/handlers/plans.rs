//! HTTP handlers for plans.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::AppState;
use crate::api::models::pagination::ItemsResponse;
use crate::api::models::plans::{ListPlansQuery, PlanCreate, PlanResponse};
use crate::api::models::system::ErrorResponse;
use crate::db::handlers::{Plans, Repository, plans::PlanFilter};
use crate::db::models::plans::PlanCreateDBRequest;
use crate::errors::Result;

#[utoipa::path(
    post,
    path = "/api/plans",
    tag = "plans",
    summary = "Create plan",
    description = "Add a priced tier to a listing. `per_minute_limit` defaults to 60 and `monthly_quota` to 10000.",
    request_body = PlanCreate,
    responses(
        (status = 200, description = "Plan created", body = PlanResponse),
        (status = 422, description = "Invalid price, billing cycle or limits", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_plan(State(state): State<AppState>, Json(create): Json<PlanCreate>) -> Result<Json<PlanResponse>> {
    let request = PlanCreateDBRequest::try_from(create)?;
    let plan = Plans::new(state.store.as_ref()).create(&request).await?;
    Ok(Json(PlanResponse::from(plan)))
}

#[utoipa::path(
    get,
    path = "/api/plans",
    tag = "plans",
    summary = "List plans",
    params(ListPlansQuery),
    responses(
        (status = 200, description = "Matching plans", body = ItemsResponse<PlanResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_plans(State(state): State<AppState>, Query(query): Query<ListPlansQuery>) -> Result<Json<ItemsResponse<PlanResponse>>> {
    let filter = PlanFilter {
        api_id: query.api_id,
        billing_cycle: query.billing_cycle,
        limit: query.pagination.limit(&state.config.pagination),
    };

    let plans = Plans::new(state.store.as_ref()).list(&filter).await?;
    Ok(Json(ItemsResponse::new(plans.into_iter().map(PlanResponse::from).collect())))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::create_test_app;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    #[test_log::test(tokio::test)]
    async fn test_create_plan_defaults() {
        let (app, _store) = create_test_app().await;

        let response = app
            .post("/api/plans")
            .json(&json!({
                "api_id": "api-1",
                "name": "Starter",
                "price_cents": 0,
                "billing_cycle": "monthly",
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["per_minute_limit"], 60);
        assert_eq!(body["monthly_quota"], 10000);
        assert_eq!(body["features"], json!([]));
        assert_eq!(body["created_at"], body["updated_at"]);
    }

    #[test_log::test(tokio::test)]
    async fn test_create_plan_rejects_negative_price() {
        let (app, store) = create_test_app().await;

        let response = app
            .post("/api/plans")
            .json(&json!({
                "api_id": "api-1",
                "name": "Refund",
                "price_cents": -100,
                "billing_cycle": "one_time",
            }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.json::<Value>()["field"], "price_cents");
        assert_eq!(store.count("plan"), 0);
    }

    #[test_log::test(tokio::test)]
    async fn test_list_plans_by_cycle() {
        let (app, _store) = create_test_app().await;
        for (name, cycle) in [("Monthly", "monthly"), ("Yearly", "yearly"), ("Once", "one_time")] {
            app.post("/api/plans")
                .json(&json!({ "api_id": "api-1", "name": name, "price_cents": 500, "billing_cycle": cycle }))
                .await
                .assert_status_ok();
        }

        let body: Value = app
            .get("/api/plans")
            .add_query_param("api_id", "api-1")
            .add_query_param("billing_cycle", "yearly")
            .await
            .json();
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["items"][0]["name"], "Yearly");
    }
}
