//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! - **System** (`/`, `/test`, `/healthz`): Service banner, store diagnostics, liveness
//! - **Listings** (`/api/listings`): Publish and search API listings
//! - **Users** (`/api/users`): Register and look up accounts
//! - **Plans** (`/api/plans`): Priced tiers per listing
//! - **Subscriptions** (`/api/subscriptions`): Buyer subscriptions and their API keys
//! - **Reviews** (`/api/reviews`): Ratings and comments on listings
//! - **Usage** (`/api/usage`): Per-call usage records
//!
//! Every `POST` creates one record and returns it with its new `id`; every `GET` on a collection
//! returns `{"items": [...]}` in insertion order.
//!
//! # OpenAPI Documentation
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`.
//! API documentation is available at `/docs` when the server is running.

pub mod handlers;
pub mod models;
