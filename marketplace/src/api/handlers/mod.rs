//! HTTP request handlers for all API endpoints.
//!
//! Each handler deserializes the request, validates it through the API models, runs the
//! matching repository operation against the shared store, and serializes the response.
//!
//! # Handler Modules
//!
//! - [`system`]: Service banner and store diagnostics
//! - [`listings`]: Listing creation and search
//! - [`users`]: User registration and lookup
//! - [`plans`]: Plan creation and listing
//! - [`subscriptions`]: Subscription creation (with API key issuance) and listing
//! - [`reviews`]: Review creation and listing
//! - [`usage_logs`]: Usage recording and listing
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Result`], which converts to an HTTP status code and a JSON
//! error body.

pub mod listings;
pub mod plans;
pub mod reviews;
pub mod subscriptions;
pub mod system;
pub mod usage_logs;
pub mod users;
