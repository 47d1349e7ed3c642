//! Repository implementations for store access.
//!
//! Each repository borrows the shared [`DocumentStore`](crate::store::DocumentStore) handle,
//! stamps new records with the current time, writes them to the entity's collection, and turns
//! list filters into store [`Filter`](crate::store::Filter)s.
//!
//! # Available Repositories
//!
//! - [`Listings`]: API listings, searchable by title and category
//! - [`Users`]: Accounts by role or email
//! - [`Plans`]: Plans by listing or billing cycle
//! - [`Subscriptions`]: Subscriptions by user, listing or active flag
//! - [`Reviews`]: Reviews by listing or author
//! - [`UsageLogs`]: Usage entries by subscription
//!
//! # Common Pattern
//!
//! ```ignore
//! use marketplace::db::handlers::{Plans, Repository};
//!
//! let plans = Plans::new(state.store.as_ref());
//! let monthly = plans
//!     .list(&PlanFilter {
//!         billing_cycle: Some(BillingCycle::Monthly),
//!         ..PlanFilter::new(20)
//!     })
//!     .await?;
//! ```

pub mod listings;
pub mod plans;
pub mod repository;
pub mod reviews;
pub mod subscriptions;
pub mod usage_logs;
pub mod users;

pub use listings::Listings;
pub use plans::Plans;
pub use repository::Repository;
pub use reviews::Reviews;
pub use subscriptions::Subscriptions;
pub use usage_logs::UsageLogs;
pub use users::Users;
