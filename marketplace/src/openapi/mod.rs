//! OpenAPI documentation for the marketplace API.
//!
//! The document is served as JSON at `/api-docs/openapi.json` and rendered at `/docs`.

use utoipa::OpenApi;

use crate::api::handlers::{listings, plans, reviews, subscriptions, system, usage_logs, users};
use crate::api::models::{
    listings::{ListingCreate, ListingResponse},
    plans::{PlanCreate, PlanResponse},
    reviews::{ReviewCreate, ReviewResponse},
    subscriptions::{SubscriptionCreate, SubscriptionResponse},
    system::{ConnectionStatus, DiagnosticsResponse, ErrorResponse, RootResponse},
    usage_logs::{UsageLogCreate, UsageLogResponse},
    users::{UserCreate, UserResponse},
};
use crate::db::models::{plans::BillingCycle, users::Role};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API Marketplace",
        description = "Create and search API listings, plans, subscriptions, reviews and usage records.",
    ),
    paths(
        system::root,
        system::diagnostics,
        listings::create_listing,
        listings::list_listings,
        users::create_user,
        users::list_users,
        plans::create_plan,
        plans::list_plans,
        subscriptions::create_subscription,
        subscriptions::list_subscriptions,
        reviews::create_review,
        reviews::list_reviews,
        usage_logs::record_usage,
        usage_logs::list_usage,
    ),
    components(schemas(
        RootResponse,
        DiagnosticsResponse,
        ConnectionStatus,
        ErrorResponse,
        ListingCreate,
        ListingResponse,
        UserCreate,
        UserResponse,
        Role,
        PlanCreate,
        PlanResponse,
        BillingCycle,
        SubscriptionCreate,
        SubscriptionResponse,
        ReviewCreate,
        ReviewResponse,
        UsageLogCreate,
        UsageLogResponse,
    )),
    tags(
        (name = "system", description = "Service status"),
        (name = "listings", description = "API listings offered by sellers"),
        (name = "users", description = "Marketplace accounts"),
        (name = "plans", description = "Priced tiers attached to listings"),
        (name = "subscriptions", description = "User subscriptions to plans"),
        (name = "reviews", description = "Ratings left on listings"),
        (name = "usage", description = "Per-call usage records"),
    )
)]
pub struct ApiDoc;
