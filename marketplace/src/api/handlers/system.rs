//! HTTP handlers for service status endpoints.

use axum::{Json, extract::State};
use tracing::warn;

use crate::AppState;
use crate::api::models::system::{ConnectionStatus, DiagnosticsResponse, RootResponse};

#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    summary = "Service banner",
    responses(
        (status = 200, description = "Service is running", body = RootResponse),
    )
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "API Marketplace backend is running".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/test",
    tag = "system",
    summary = "Store diagnostics",
    description = "Reports which document store is configured and whether it answers. Always returns 200; a failing store is reported as `unavailable`.",
    responses(
        (status = 200, description = "Diagnostic information", body = DiagnosticsResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let (connection_status, collections) = match state.store.list_collection_names().await {
        Ok(collections) => (ConnectionStatus::Connected, collections),
        Err(e) => {
            warn!("Document store did not answer diagnostics probe: {:#}", e);
            (ConnectionStatus::Unavailable, Vec::new())
        }
    };

    Json(DiagnosticsResponse {
        backend: env!("CARGO_PKG_NAME").to_string(),
        database: state.store.backend_name().to_string(),
        database_url: state.config.database.redacted_url(),
        database_name: state.config.database_name.clone(),
        connection_status,
        collections,
    })
}
