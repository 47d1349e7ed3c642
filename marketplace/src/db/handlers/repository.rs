//! Base repository trait for document store operations.

use serde::{Serialize, de::DeserializeOwned, ser::Error as _};
use serde_json::Value;

use crate::db::models::Stored;
use crate::store::{DocumentStore, Filter, Result, StoreError};

/// Base repository trait providing the operations every collection supports.
///
/// A repository is the data access layer for one collection. Records are append-only, so there
/// is no update or delete.
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest: Send + Sync;

    /// The response/DTO type returned by operations
    type Response;

    /// The filter type for list operations
    type Filter: Send + Sync;

    /// Create a new entity
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// List entities matching the filter, in insertion order
    async fn list(&self, filter: &Self::Filter) -> Result<Vec<Self::Response>>;
}

/// Serialize a record and insert it, returning the record alongside its new identifier.
pub(crate) async fn insert_record<T>(store: &dyn DocumentStore, collection: &str, record: T) -> Result<Stored<T>>
where
    T: Serialize + Send,
{
    let encode_err = |source| StoreError::Encode {
        collection: collection.to_string(),
        source,
    };

    let document = match serde_json::to_value(&record).map_err(encode_err)? {
        Value::Object(map) => map,
        other => {
            return Err(encode_err(serde_json::Error::custom(format!(
                "record must serialize to an object, got {other}"
            ))));
        }
    };

    let id = store.insert(collection, document).await?;
    Ok(Stored::new(id.into_string(), record))
}

/// Find documents and decode each into a typed record.
pub(crate) async fn find_records<T>(store: &dyn DocumentStore, collection: &str, filter: &Filter, limit: usize) -> Result<Vec<Stored<T>>>
where
    T: DeserializeOwned,
{
    store
        .find(collection, filter, limit)
        .await?
        .into_iter()
        .map(|document| {
            serde_json::from_value(Value::Object(document)).map_err(|source| StoreError::Decode {
                collection: collection.to_string(),
                source,
            })
        })
        .collect()
}
