//! In-process document store.

use dashmap::DashMap;
use serde_json::Value;
use tracing::instrument;
use uuid::Uuid;

use super::{Document, DocumentStore, Filter, ID_FIELD, InsertedId, errors::Result};

/// Collections held in memory, each a vector in insertion order.
///
/// Each collection is locked independently and only for the duration of a single insert or scan,
/// so concurrent requests against different collections never contend.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: DashMap<String, Vec<Document>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection (0 if it does not exist)
    pub fn count(&self, collection: &str) -> usize {
        self.collections.get(collection).map(|docs| docs.len()).unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    #[instrument(skip(self, document), err)]
    async fn insert(&self, collection: &str, mut document: Document) -> Result<InsertedId> {
        let id = InsertedId::new(Uuid::new_v4().to_string());
        document.insert(ID_FIELD.to_string(), Value::String(id.as_str().to_string()));
        self.collections.entry(collection.to_string()).or_default().push(document);
        Ok(id)
    }

    #[instrument(skip(self, filter), fields(filter = %filter.to_json()), err)]
    async fn find(&self, collection: &str, filter: &Filter, limit: usize) -> Result<Vec<Document>> {
        let compiled = filter.compile()?;
        let Some(documents) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(documents
            .iter()
            .filter(|doc| compiled.matches(doc))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .collections
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        Ok(names)
    }
}
