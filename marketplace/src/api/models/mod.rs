//! API request and response data models.
//!
//! These structures define the public HTTP contract. They are kept separate from the records in
//! [`crate::db::models`] so storage-only fields never reach a response.
//!
//! # Design Principles
//!
//! - **Validation at the boundary**: create payloads are checked and normalized here before a
//!   database request is built; a failure names the offending field
//! - **Lenient bodies**: unknown fields are ignored, and missing required strings surface as
//!   validation errors rather than parse errors
//! - **OpenAPI**: all models are annotated with `utoipa`
//!
//! # Model Categories
//!
//! - [`listings`], [`users`], [`plans`], [`subscriptions`], [`reviews`], [`usage_logs`]:
//!   per-entity create payloads, list queries and responses
//! - [`pagination`]: the shared `limit` parameter and list envelope
//! - [`system`]: service banner and store diagnostics

pub mod listings;
pub mod pagination;
pub mod plans;
pub mod reviews;
pub mod subscriptions;
pub mod system;
pub mod usage_logs;
pub mod users;
pub(crate) mod validation;
