//! Data access layer over the document store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (API request handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - record normalization & filters)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - stored records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │DocumentStore│
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations for create and list
//! - [`models`]: Record structures written to each collection
//!
//! ## Example Usage
//!
//! ```ignore
//! use marketplace::db::handlers::{Listings, Repository};
//!
//! async fn example(store: &dyn marketplace::store::DocumentStore) -> marketplace::store::Result<()> {
//!     let repo = Listings::new(store);
//!     let listing = repo.create(&create_request).await?;
//!     println!("Created listing {}", listing.id);
//!     Ok(())
//! }
//! ```

pub mod handlers;
pub mod models;
