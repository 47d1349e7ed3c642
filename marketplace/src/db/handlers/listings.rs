use chrono::Utc;
use tracing::instrument;

use crate::db::handlers::repository::{Repository, find_records, insert_record};
use crate::db::models::listings::{COLLECTION, ListingCreateDBRequest, ListingDBResponse};
use crate::store::{DocumentStore, Filter, Result};

/// Filter for listing API listings
#[derive(Debug, Clone)]
pub struct ListingFilter {
    /// Case-insensitive substring of the title
    pub query: Option<String>,
    /// Exact category
    pub category: Option<String>,
    pub limit: usize,
}

impl ListingFilter {
    pub fn new(limit: usize) -> Self {
        Self {
            query: None,
            category: None,
            limit,
        }
    }

    /// Empty strings are treated the same as absent values.
    pub fn to_store_filter(&self) -> Filter {
        let mut filter = Filter::all();
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            filter = filter.contains_ignore_case("title", query);
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            filter = filter.eq("category", category);
        }
        filter
    }
}

pub struct Listings<'s> {
    store: &'s dyn DocumentStore,
}

impl<'s> Listings<'s> {
    pub fn new(store: &'s dyn DocumentStore) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl<'s> Repository for Listings<'s> {
    type CreateRequest = ListingCreateDBRequest;
    type Response = ListingDBResponse;
    type Filter = ListingFilter;

    #[instrument(skip(self, request), fields(slug = %request.slug), err)]
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let record = request.clone().into_record(Utc::now());
        insert_record(self.store, COLLECTION, record).await
    }

    #[instrument(skip(self, filter), fields(query = ?filter.query, category = ?filter.category, limit = filter.limit), err)]
    async fn list(&self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        find_records(self.store, COLLECTION, &filter.to_store_filter(), filter.limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use serde_json::json;

    fn listing(title: &str, slug: &str, category: &str) -> ListingCreateDBRequest {
        ListingCreateDBRequest {
            owner_id: "seller-1".into(),
            title: title.into(),
            slug: slug.into(),
            description: "An API".into(),
            category: category.into(),
            tags: vec![],
        }
    }

    fn search(query: Option<&str>, category: Option<&str>) -> ListingFilter {
        ListingFilter {
            query: query.map(str::to_string),
            category: category.map(str::to_string),
            ..ListingFilter::new(20)
        }
    }

    async fn seed(repo: &Listings<'_>) {
        for (title, slug, category) in [
            ("Weather API", "weather", "data"),
            ("api-gateway", "gateway", "infra"),
            ("Maps SDK", "maps", "finance"),
        ] {
            repo.create(&listing(title, slug, category)).await.unwrap();
        }
    }

    #[test]
    fn test_store_filter_shape() {
        let filter = search(Some("API"), Some("finance")).to_store_filter();
        assert_eq!(
            filter.to_json(),
            json!({
                "title": {"$regex": "API", "$options": "i"},
                "category": "finance",
            })
        );
    }

    #[test]
    fn test_store_filter_ignores_empty_values() {
        let filter = search(Some(""), Some("")).to_store_filter();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_store_filter_escapes_query_text() {
        let filter = search(Some("c++ (beta)"), None).to_store_filter();
        assert_eq!(filter.to_json()["title"]["$regex"], json!(r"c\+\+ \(beta\)"));
    }

    #[tokio::test]
    async fn test_create_returns_stored_record() {
        let store = InMemoryStore::new();
        let repo = Listings::new(&store);

        let before = Utc::now();
        let created = repo.create(&listing("Weather API", "weather", "data")).await.unwrap();
        let after = Utc::now();

        assert!(!created.id.is_empty());
        assert!(created.record.created_at >= before && created.record.created_at <= after);
        assert_eq!(created.record.created_at, created.record.updated_at);
        assert_eq!(store.count(COLLECTION), 1);
    }

    #[tokio::test]
    async fn test_list_by_title_is_case_insensitive() {
        let store = InMemoryStore::new();
        let repo = Listings::new(&store);
        seed(&repo).await;

        let found = repo.list(&search(Some("API"), None)).await.unwrap();
        let titles: Vec<_> = found.iter().map(|l| l.record.title.as_str()).collect();
        assert_eq!(titles, vec!["Weather API", "api-gateway"]);
    }

    #[tokio::test]
    async fn test_list_by_category_is_exact() {
        let store = InMemoryStore::new();
        let repo = Listings::new(&store);
        seed(&repo).await;

        let found = repo.list(&search(None, Some("finance"))).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].record.title, "Maps SDK");

        let found = repo.list(&search(None, Some("Finance"))).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_list_combines_conditions() {
        let store = InMemoryStore::new();
        let repo = Listings::new(&store);
        seed(&repo).await;

        let found = repo.list(&search(Some("api"), Some("infra"))).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].record.slug, "gateway");
    }

    #[tokio::test]
    async fn test_duplicate_slugs_are_accepted() {
        let store = InMemoryStore::new();
        let repo = Listings::new(&store);

        let first = repo.create(&listing("Weather API", "weather", "data")).await.unwrap();
        let second = repo.create(&listing("Weather API v2", "weather", "data")).await.unwrap();
        assert_ne!(first.id, second.id);

        let found = repo.list(&search(Some("weather"), None)).await.unwrap();
        assert_eq!(found, vec![first, second]);
    }
}
