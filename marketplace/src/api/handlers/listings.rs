//! HTTP handlers for API listings.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::AppState;
use crate::api::models::listings::{ListListingsQuery, ListingCreate, ListingResponse};
use crate::api::models::pagination::ItemsResponse;
use crate::api::models::system::ErrorResponse;
use crate::db::handlers::{Listings, Repository, listings::ListingFilter};
use crate::db::models::listings::ListingCreateDBRequest;
use crate::errors::Result;

#[utoipa::path(
    post,
    path = "/api/listings",
    tag = "listings",
    summary = "Create listing",
    description = "Publish a new API listing. `docs_url`, `base_url`, `rating` and `rating_count` are initialized by the server. Slugs are not checked for uniqueness.",
    request_body = ListingCreate,
    responses(
        (status = 200, description = "Listing created", body = ListingResponse),
        (status = 422, description = "A required field is missing or blank", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_listing(State(state): State<AppState>, Json(create): Json<ListingCreate>) -> Result<Json<ListingResponse>> {
    let request = ListingCreateDBRequest::try_from(create)?;
    let listing = Listings::new(state.store.as_ref()).create(&request).await?;
    Ok(Json(ListingResponse::from(listing)))
}

#[utoipa::path(
    get,
    path = "/api/listings",
    tag = "listings",
    summary = "Search listings",
    description = "List listings in creation order, optionally narrowed by a title substring (`q`, case-insensitive) and an exact `category`.",
    params(ListListingsQuery),
    responses(
        (status = 200, description = "Matching listings", body = ItemsResponse<ListingResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_listings(
    State(state): State<AppState>,
    Query(query): Query<ListListingsQuery>,
) -> Result<Json<ItemsResponse<ListingResponse>>> {
    let filter = ListingFilter {
        query: query.q,
        category: query.category,
        limit: query.pagination.limit(&state.config.pagination),
    };

    let listings = Listings::new(state.store.as_ref()).list(&filter).await?;
    Ok(Json(ItemsResponse::new(listings.into_iter().map(ListingResponse::from).collect())))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::create_test_app;
    use axum::http::StatusCode;
    use chrono::{DateTime, Utc};
    use serde_json::{Value, json};

    fn listing(title: &str, slug: &str, category: &str) -> Value {
        json!({
            "owner_id": "seller-1",
            "title": title,
            "slug": slug,
            "description": format!("{title} description"),
            "category": category,
        })
    }

    fn titles(body: &Value) -> Vec<String> {
        body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["title"].as_str().unwrap().to_string())
            .collect()
    }

    #[test_log::test(tokio::test)]
    async fn test_create_listing_sets_server_fields() {
        let (app, _store) = create_test_app().await;

        let before = Utc::now();
        let response = app
            .post("/api/listings")
            .json(&json!({
                "owner_id": "seller-1",
                "title": "Weather API",
                "slug": "weather-api",
                "description": "Forecasts",
                "category": "data",
                "tags": ["weather", "forecast"],
                "docs_url": "https://docs.example.com",
                "rating": 4.9,
                "rating_count": 1200,
            }))
            .await;
        let after = Utc::now();

        response.assert_status_ok();
        let body: Value = response.json();
        assert!(!body["id"].as_str().unwrap().is_empty());
        assert_eq!(body["docs_url"], Value::Null);
        assert_eq!(body["base_url"], Value::Null);
        assert_eq!(body["rating"], json!(0.0));
        assert_eq!(body["rating_count"], json!(0));
        assert_eq!(body["tags"], json!(["weather", "forecast"]));

        let created_at: DateTime<Utc> = serde_json::from_value(body["created_at"].clone()).unwrap();
        let updated_at: DateTime<Utc> = serde_json::from_value(body["updated_at"].clone()).unwrap();
        assert_eq!(created_at, updated_at);
        assert!(created_at >= before && created_at <= after);
    }

    #[test_log::test(tokio::test)]
    async fn test_create_listing_rejects_blank_title() {
        let (app, store) = create_test_app().await;

        let response = app.post("/api/listings").json(&listing("   ", "blank", "data")).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["field"], "title");
        assert_eq!(store.count("apilisting"), 0);
    }

    #[test_log::test(tokio::test)]
    async fn test_create_listing_trims_values() {
        let (app, _store) = create_test_app().await;

        let response = app
            .post("/api/listings")
            .json(&json!({
                "owner_id": " seller-1",
                "title": "  Rates API ",
                "slug": "rates\t",
                "description": "FX rates",
                "category": "finance ",
                "tags": [" fx ", "  ", "rates"],
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["owner_id"], "seller-1");
        assert_eq!(body["title"], "Rates API");
        assert_eq!(body["slug"], "rates");
        assert_eq!(body["category"], "finance");
        assert_eq!(body["tags"], json!(["fx", "rates"]));

        let found: Value = app.get("/api/listings").add_query_param("category", "finance").await.json();
        assert_eq!(titles(&found), vec!["Rates API"]);
    }

    #[test_log::test(tokio::test)]
    async fn test_search_is_case_insensitive_and_ordered() {
        let (app, _store) = create_test_app().await;
        for (title, slug) in [("Weather API", "weather"), ("api-gateway", "gateway"), ("Maps SDK", "maps")] {
            app.post("/api/listings")
                .json(&listing(title, slug, "data"))
                .await
                .assert_status_ok();
        }

        let body: Value = app.get("/api/listings").add_query_param("q", "API").await.json();

        assert_eq!(titles(&body), vec!["Weather API", "api-gateway"]);
    }

    #[test_log::test(tokio::test)]
    async fn test_query_text_is_literal() {
        let (app, _store) = create_test_app().await;
        app.post("/api/listings")
            .json(&listing("C++ bindings", "cpp", "sdk"))
            .await
            .assert_status_ok();
        app.post("/api/listings")
            .json(&listing("Cxx tools", "cxx", "sdk"))
            .await
            .assert_status_ok();

        let body: Value = app.get("/api/listings").add_query_param("q", "c++").await.json();

        assert_eq!(titles(&body), vec!["C++ bindings"]);
    }

    #[test_log::test(tokio::test)]
    async fn test_category_is_exact_and_case_sensitive() {
        let (app, _store) = create_test_app().await;
        app.post("/api/listings")
            .json(&listing("Payments", "payments", "finance"))
            .await
            .assert_status_ok();
        app.post("/api/listings")
            .json(&listing("Ledger", "ledger", "Finance"))
            .await
            .assert_status_ok();
        app.post("/api/listings")
            .json(&listing("Budget", "budget", "finance-tools"))
            .await
            .assert_status_ok();

        let body: Value = app.get("/api/listings").add_query_param("category", "finance").await.json();

        assert_eq!(titles(&body), vec!["Payments"]);
    }

    #[test_log::test(tokio::test)]
    async fn test_limit_caps_results() {
        let (app, _store) = create_test_app().await;
        for i in 0..5 {
            app.post("/api/listings")
                .json(&listing(&format!("API {i}"), &format!("api-{i}"), "data"))
                .await
                .assert_status_ok();
        }

        let body: Value = app.get("/api/listings").add_query_param("limit", 2).await.json();
        assert_eq!(titles(&body), vec!["API 0", "API 1"]);

        // Zero is clamped up to one
        let body: Value = app.get("/api/listings").add_query_param("limit", 0).await.json();
        assert_eq!(titles(&body).len(), 1);
    }

    #[test_log::test(tokio::test)]
    async fn test_duplicate_slugs_are_both_listed() {
        let (app, _store) = create_test_app().await;

        let first: Value = app.post("/api/listings").json(&listing("Weather API", "weather", "data")).await.json();
        let second: Value = app.post("/api/listings").json(&listing("Weather API", "weather", "data")).await.json();
        assert_ne!(first["id"], second["id"]);

        let body: Value = app.get("/api/listings").await.json();
        let ids: Vec<_> = body["items"].as_array().unwrap().iter().map(|item| item["id"].clone()).collect();
        assert_eq!(ids, vec![first["id"].clone(), second["id"].clone()]);
    }

    #[test_log::test(tokio::test)]
    async fn test_created_listings_are_findable_by_title() {
        let (app, _store) = create_test_app().await;
        let titles_to_create = ["Geocoding Service", "SMS Gateway", "Currency Rates"];

        for (i, title) in titles_to_create.iter().enumerate() {
            app.post("/api/listings")
                .json(&listing(title, &format!("slug-{i}"), "data"))
                .await
                .assert_status_ok();
        }

        for title in titles_to_create {
            let fragment = &title[2..8];
            let body: Value = app.get("/api/listings").add_query_param("q", fragment).await.json();
            assert!(titles(&body).contains(&title.to_string()), "{title} not found via {fragment:?}");
        }
    }
}
