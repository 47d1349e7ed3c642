use chrono::Utc;
use tracing::instrument;

use crate::db::handlers::repository::{Repository, find_records, insert_record};
use crate::db::models::users::{COLLECTION, Role, UserCreateDBRequest, UserDBResponse};
use crate::store::{DocumentStore, Filter, Result};

/// Filter for listing users
#[derive(Debug, Clone)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub email: Option<String>,
    pub limit: usize,
}

impl UserFilter {
    pub fn new(limit: usize) -> Self {
        Self {
            role: None,
            email: None,
            limit,
        }
    }

    pub fn to_store_filter(&self) -> Filter {
        let mut filter = Filter::all();
        if let Some(role) = self.role {
            filter = filter.eq("role", role.as_str());
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            filter = filter.eq("email", email);
        }
        filter
    }
}

pub struct Users<'s> {
    store: &'s dyn DocumentStore,
}

impl<'s> Users<'s> {
    pub fn new(store: &'s dyn DocumentStore) -> Self {
        Self { store }
    }

    /// First user registered with this email, if any. Emails are not enforced unique.
    #[instrument(skip(self), err)]
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserDBResponse>> {
        let filter = UserFilter {
            email: Some(email.to_string()),
            ..UserFilter::new(1)
        };
        Ok(self.list(&filter).await?.into_iter().next())
    }
}

#[async_trait::async_trait]
impl<'s> Repository for Users<'s> {
    type CreateRequest = UserCreateDBRequest;
    type Response = UserDBResponse;
    type Filter = UserFilter;

    #[instrument(skip(self, request), fields(role = request.role.as_str()), err)]
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let record = request.clone().into_record(Utc::now());
        insert_record(self.store, COLLECTION, record).await
    }

    #[instrument(skip(self, filter), fields(role = ?filter.role, limit = filter.limit), err)]
    async fn list(&self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        find_records(self.store, COLLECTION, &filter.to_store_filter(), filter.limit).await
    }
}
