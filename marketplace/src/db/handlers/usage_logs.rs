use chrono::Utc;
use tracing::instrument;

use crate::db::handlers::repository::{Repository, find_records, insert_record};
use crate::db::models::usage_logs::{COLLECTION, UsageLogCreateDBRequest, UsageLogDBResponse};
use crate::store::{DocumentStore, Filter, Result};

/// Filter for listing usage logs
#[derive(Debug, Clone)]
pub struct UsageLogFilter {
    pub subscription_id: Option<String>,
    pub limit: usize,
}

impl UsageLogFilter {
    pub fn new(limit: usize) -> Self {
        Self {
            subscription_id: None,
            limit,
        }
    }

    pub fn to_store_filter(&self) -> Filter {
        match self.subscription_id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => Filter::all().eq("subscription_id", id),
            None => Filter::all(),
        }
    }
}

/// Append-only access to the `usagelog` collection
pub struct UsageLogs<'s> {
    store: &'s dyn DocumentStore,
}

impl<'s> UsageLogs<'s> {
    pub fn new(store: &'s dyn DocumentStore) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<'s> Repository for UsageLogs<'s> {
    type CreateRequest = UsageLogCreateDBRequest;
    type Response = UsageLogDBResponse;
    type Filter = UsageLogFilter;

    #[instrument(skip(self, request), fields(subscription_id = %request.subscription_id, status = request.status_code), err)]
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let record = request.clone().into_record(Utc::now());
        insert_record(self.store, COLLECTION, record).await
    }

    #[instrument(skip(self, filter), fields(subscription_id = ?filter.subscription_id, limit = filter.limit), err)]
    async fn list(&self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        find_records(self.store, COLLECTION, &filter.to_store_filter(), filter.limit).await
    }
}
