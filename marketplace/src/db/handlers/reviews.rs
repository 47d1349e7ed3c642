use chrono::Utc;
use tracing::instrument;

use crate::db::handlers::repository::{Repository, find_records, insert_record};
use crate::db::models::reviews::{COLLECTION, ReviewCreateDBRequest, ReviewDBResponse};
use crate::store::{DocumentStore, Filter, Result};

/// Filter for listing reviews
#[derive(Debug, Clone)]
pub struct ReviewFilter {
    pub api_id: Option<String>,
    pub user_id: Option<String>,
    pub limit: usize,
}

impl ReviewFilter {
    pub fn new(limit: usize) -> Self {
        Self {
            api_id: None,
            user_id: None,
            limit,
        }
    }

    pub fn to_store_filter(&self) -> Filter {
        let mut filter = Filter::all();
        if let Some(api_id) = self.api_id.as_deref().filter(|id| !id.is_empty()) {
            filter = filter.eq("api_id", api_id);
        }
        if let Some(user_id) = self.user_id.as_deref().filter(|id| !id.is_empty()) {
            filter = filter.eq("user_id", user_id);
        }
        filter
    }
}

pub struct Reviews<'s> {
    store: &'s dyn DocumentStore,
}

impl<'s> Reviews<'s> {
    pub fn new(store: &'s dyn DocumentStore) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<'s> Repository for Reviews<'s> {
    type CreateRequest = ReviewCreateDBRequest;
    type Response = ReviewDBResponse;
    type Filter = ReviewFilter;

    #[instrument(skip(self, request), fields(api_id = %request.api_id, rating = request.rating), err)]
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let record = request.clone().into_record(Utc::now());
        insert_record(self.store, COLLECTION, record).await
    }

    #[instrument(skip(self, filter), fields(api_id = ?filter.api_id, limit = filter.limit), err)]
    async fn list(&self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        find_records(self.store, COLLECTION, &filter.to_store_filter(), filter.limit).await
    }
}
