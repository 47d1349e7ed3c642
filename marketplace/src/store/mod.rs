//! Document store abstraction used for all persistence.
//!
//! The marketplace persists every entity as a flat JSON document in a named collection (the
//! lowercased entity name, e.g. `apilisting`). Backends implement [`DocumentStore`]:
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (api::handlers - HTTP binding)
//! └──────┬──────┘
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - validation output → typed records)
//! └──────┬──────┘
//!        ↓
//! ┌─────────────┐
//! │DocumentStore│  (memory | postgres)
//! └─────────────┘
//! ```
//!
//! - [`memory::InMemoryStore`]: process-local collections, used for development and tests
//! - [`postgres::PostgresStore`]: JSONB documents in a single PostgreSQL table
//!
//! Stores are shared as `Arc<dyn DocumentStore>` and must support concurrent calls without
//! external locking.

pub mod errors;
pub mod filter;
pub mod memory;
pub mod postgres;

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

pub use errors::{Result, StoreError};
pub use filter::Filter;
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

/// A stored document: a flat JSON object.
pub type Document = Map<String, Value>;

/// Name of the field carrying the store-assigned identifier in documents returned by `find`.
pub const ID_FIELD: &str = "_id";

/// Identifier assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InsertedId(String);

impl InsertedId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for InsertedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persistence backend addressed by collection name and queried by structural filters.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend identifier for diagnostics (e.g. `"memory"`, `"postgres"`)
    fn backend_name(&self) -> &'static str;

    /// Insert a document and return its newly assigned identifier. Any `_id` already present in
    /// the document is replaced by the assigned one.
    async fn insert(&self, collection: &str, document: Document) -> Result<InsertedId>;

    /// Return up to `limit` documents matching `filter`, in insertion order. Every returned
    /// document carries its identifier as a string under [`ID_FIELD`].
    async fn find(&self, collection: &str, filter: &Filter, limit: usize) -> Result<Vec<Document>>;

    /// Names of all collections holding at least one document, sorted.
    async fn list_collection_names(&self) -> Result<Vec<String>>;

    /// Release backend resources. Called once at shutdown.
    async fn close(&self) {}
}
