use chrono::Utc;
use tracing::instrument;

use crate::db::handlers::repository::{Repository, find_records, insert_record};
use crate::db::models::plans::{BillingCycle, COLLECTION, PlanCreateDBRequest, PlanDBResponse};
use crate::store::{DocumentStore, Filter, Result};

/// Filter for listing plans
#[derive(Debug, Clone)]
pub struct PlanFilter {
    pub api_id: Option<String>,
    pub billing_cycle: Option<BillingCycle>,
    pub limit: usize,
}

impl PlanFilter {
    pub fn new(limit: usize) -> Self {
        Self {
            api_id: None,
            billing_cycle: None,
            limit,
        }
    }

    pub fn to_store_filter(&self) -> Filter {
        let mut filter = Filter::all();
        if let Some(api_id) = self.api_id.as_deref().filter(|id| !id.is_empty()) {
            filter = filter.eq("api_id", api_id);
        }
        if let Some(cycle) = self.billing_cycle {
            filter = filter.eq("billing_cycle", cycle.as_str());
        }
        filter
    }
}

pub struct Plans<'s> {
    store: &'s dyn DocumentStore,
}

impl<'s> Plans<'s> {
    pub fn new(store: &'s dyn DocumentStore) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<'s> Repository for Plans<'s> {
    type CreateRequest = PlanCreateDBRequest;
    type Response = PlanDBResponse;
    type Filter = PlanFilter;

    #[instrument(skip(self, request), fields(api_id = %request.api_id), err)]
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let record = request.clone().into_record(Utc::now());
        insert_record(self.store, COLLECTION, record).await
    }

    #[instrument(skip(self, filter), fields(api_id = ?filter.api_id, limit = filter.limit), err)]
    async fn list(&self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        find_records(self.store, COLLECTION, &filter.to_store_filter(), filter.limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn plan(api_id: &str, cycle: BillingCycle) -> PlanCreateDBRequest {
        PlanCreateDBRequest {
            api_id: api_id.into(),
            name: format!("{} plan", cycle.as_str()),
            price_cents: 999,
            billing_cycle: cycle,
            per_minute_limit: None,
            monthly_quota: None,
            features: vec!["support".into()],
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let store = InMemoryStore::new();
        let created = Plans::new(&store).create(&plan("api-1", BillingCycle::Monthly)).await.unwrap();

        assert_eq!(created.record.per_minute_limit, 60);
        assert_eq!(created.record.monthly_quota, 10_000);
    }

    #[tokio::test]
    async fn test_list_by_api_and_cycle() {
        let store = InMemoryStore::new();
        let repo = Plans::new(&store);
        repo.create(&plan("api-1", BillingCycle::Monthly)).await.unwrap();
        repo.create(&plan("api-1", BillingCycle::Yearly)).await.unwrap();
        repo.create(&plan("api-2", BillingCycle::Monthly)).await.unwrap();

        let found = repo
            .list(&PlanFilter {
                api_id: Some("api-1".into()),
                billing_cycle: Some(BillingCycle::Monthly),
                ..PlanFilter::new(10)
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].record.api_id, "api-1");
        assert_eq!(found[0].record.billing_cycle, BillingCycle::Monthly);
    }
}
