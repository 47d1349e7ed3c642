use chrono::Utc;
use tracing::instrument;

use crate::db::handlers::repository::{Repository, find_records, insert_record};
use crate::db::models::subscriptions::{COLLECTION, SubscriptionCreateDBRequest, SubscriptionDBResponse};
use crate::store::{DocumentStore, Filter, Result};

/// Filter for listing subscriptions
#[derive(Debug, Clone)]
pub struct SubscriptionFilter {
    pub user_id: Option<String>,
    pub api_id: Option<String>,
    pub active: Option<bool>,
    pub limit: usize,
}

impl SubscriptionFilter {
    pub fn new(limit: usize) -> Self {
        Self {
            user_id: None,
            api_id: None,
            active: None,
            limit,
        }
    }

    pub fn to_store_filter(&self) -> Filter {
        let mut filter = Filter::all();
        if let Some(user_id) = self.user_id.as_deref().filter(|id| !id.is_empty()) {
            filter = filter.eq("user_id", user_id);
        }
        if let Some(api_id) = self.api_id.as_deref().filter(|id| !id.is_empty()) {
            filter = filter.eq("api_id", api_id);
        }
        if let Some(active) = self.active {
            filter = filter.eq("active", active);
        }
        filter
    }
}

pub struct Subscriptions<'s> {
    store: &'s dyn DocumentStore,
}

impl<'s> Subscriptions<'s> {
    pub fn new(store: &'s dyn DocumentStore) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<'s> Repository for Subscriptions<'s> {
    type CreateRequest = SubscriptionCreateDBRequest;
    type Response = SubscriptionDBResponse;
    type Filter = SubscriptionFilter;

    // api_key is a credential; keep it out of spans
    #[instrument(skip(self, request), fields(user_id = %request.user_id, plan_id = %request.plan_id), err)]
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let record = request.clone().into_record(Utc::now());
        insert_record(self.store, COLLECTION, record).await
    }

    #[instrument(skip(self, filter), fields(user_id = ?filter.user_id, api_id = ?filter.api_id, limit = filter.limit), err)]
    async fn list(&self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        find_records(self.store, COLLECTION, &filter.to_store_filter(), filter.limit).await
    }
}
