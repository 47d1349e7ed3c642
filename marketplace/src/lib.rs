//! # marketplace: API Marketplace Backend
//!
//! `marketplace` is the backend of a marketplace where sellers publish API listings with priced
//! plans, buyers subscribe to those plans, leave reviews, and usage of each subscription is
//! recorded. Every entity is a flat JSON document in a named collection of a [`store::DocumentStore`].
//!
//! ## Architecture
//!
//! The HTTP layer is built on [Axum](https://github.com/tokio-rs/axum). Requests flow through
//! three layers:
//!
//! - **API handlers** ([`api::handlers`]) bind HTTP to operations and run request validation
//!   through the API models ([`api::models`])
//! - **Repositories** ([`db::handlers`]) stamp timestamps and defaults onto validated requests and
//!   talk to the store
//! - **Document stores** ([`store`]) persist collections in memory or as PostgreSQL JSONB rows
//!
//! The only shared state is [`AppState`]: the store handle and the loaded [`Config`].
//!
//! ## Endpoints
//!
//! - `GET /` and `GET /test`: service banner and store diagnostics
//! - `GET /healthz`: liveness probe
//! - `POST|GET /api/{listings,users,plans,subscriptions,reviews,usage}`: create and filter
//! - `GET /docs`, `GET /api-docs/openapi.json`: API documentation
//! - `GET /internal/metrics`: Prometheus metrics, when enabled
//!
//! ## Running
//!
//! ```no_run
//! use marketplace::{Application, Config, config::Args, telemetry};
//! use clap::Parser;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(&Args::parse())?;
//!     telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     Application::new(config).await?.serve(std::future::pending()).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod crypto;
pub mod db;
pub mod errors;
mod openapi;
pub mod store;
pub mod telemetry;

#[cfg(test)]
pub mod test_utils;

use crate::config::{CorsOrigin, DatabaseConfig};
use crate::openapi::ApiDoc;
use crate::store::{DocumentStore, InMemoryStore, PostgresStore};
use anyhow::Context;
use axum::http::{self, HeaderValue, Method, StatusCode};
use axum::{Json, Router, routing::get};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use config::Config;

/// Application state shared across all request handlers.
#[derive(Clone, Builder)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Config,
}

/// Construct the configured document store. PostgreSQL stores are migrated before use.
#[instrument(skip_all, fields(backend = config.database.backend_name()))]
pub async fn setup_store(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match &config.database {
        DatabaseConfig::Memory => {
            info!("Using in-memory document store; data will not survive a restart");
            Ok(Arc::new(InMemoryStore::new()))
        }
        DatabaseConfig::Postgres { url, pool } => {
            let options = PgPoolOptions::new()
                .max_connections(pool.max_connections)
                .min_connections(pool.min_connections)
                .acquire_timeout(Duration::from_secs(pool.acquire_timeout_secs));

            let store = PostgresStore::connect(url, &config.database_name, options)
                .await
                .context("Failed to connect to the PostgreSQL document store")?;
            info!(schema = %config.database_name, "Connected to PostgreSQL document store");
            Ok(Arc::new(store))
        }
    }
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors = &config.cors;

    // A wildcard anywhere in the list allows every origin
    let mut layer = if cors.allowed_origins.contains(&CorsOrigin::Wildcard) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let mut origins = Vec::with_capacity(cors.allowed_origins.len());
        for origin in &cors.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                // Origins never carry a path, but Url always renders one
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        CorsLayer::new().allow_origin(origins)
    };

    layer = layer
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION, http::header::ACCEPT])
        .allow_credentials(cors.allow_credentials);

    if let Some(max_age) = cors.max_age {
        layer = layer.max_age(Duration::from_secs(max_age));
    }

    Ok(layer)
}

/// Build the application router with all endpoints and middleware.
///
/// Layers, outermost first: tracing, Prometheus (when enabled), request timeout, CORS.
///
/// # Errors
///
/// Returns an error if a configured CORS origin is not a valid header value.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    use api::handlers::{listings, plans, reviews, subscriptions, system, usage_logs, users};
    use axum::routing::post;

    let api_routes = Router::new()
        .route("/listings", post(listings::create_listing).get(listings::list_listings))
        .route("/users", post(users::create_user).get(users::list_users))
        .route("/plans", post(plans::create_plan).get(plans::list_plans))
        .route("/subscriptions", post(subscriptions::create_subscription).get(subscriptions::list_subscriptions))
        .route("/reviews", post(reviews::create_review).get(reviews::list_reviews))
        .route("/usage", post(usage_logs::record_usage).get(usage_logs::list_usage));

    let router = Router::new()
        .route("/", get(system::root))
        .route("/test", get(system::diagnostics))
        .route("/healthz", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api", api_routes)
        .with_state(state.clone())
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    let mut router = router
        .layer(create_cors_layer(&state.config)?)
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, state.config.request_timeout));

    if state.config.enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route("/internal/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// The marketplace service: a router bound to its store.
///
/// # Lifecycle
///
/// 1. **Initialization** ([`Application::new`]): connect (and migrate) the store, build the router
/// 2. **Serving** ([`Application::serve`]): accept HTTP connections until the shutdown future resolves
/// 3. **Shutdown**: drain in-flight requests, close the store, flush telemetry
pub struct Application {
    router: Router,
    config: Config,
    store: Arc<dyn DocumentStore>,
}

impl Application {
    /// Create a new application instance using the store named in the configuration
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting marketplace with configuration: {:#?}", config);
        let store = setup_store(&config).await?;
        Self::new_with_store(config, store)
    }

    /// Create an application around an already constructed store
    pub fn new_with_store(config: Config, store: Arc<dyn DocumentStore>) -> anyhow::Result<Self> {
        let app_state = AppState::builder().store(store.clone()).config(config.clone()).build();
        let router = build_router(&app_state)?;

        Ok(Self { router, config, store })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("Failed to bind {bind_addr}"))?;
        info!(
            "Marketplace listening on http://{}, using the {} store",
            bind_addr,
            self.store.backend_name()
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing document store...");
        self.store.close().await;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
