//! Helpers for building test applications on the in-memory store.

use std::sync::Arc;

use axum_test::TestServer;

use crate::config::{Config, DatabaseConfig};
use crate::store::InMemoryStore;

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseConfig::Memory,
        ..Default::default()
    }
}

/// A test server plus a handle on its store, for asserting what was (not) persisted
pub async fn create_test_app() -> (TestServer, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let app = crate::Application::new_with_store(create_test_config(), store.clone()).expect("Failed to create application");
    (app.into_test_server(), store)
}
