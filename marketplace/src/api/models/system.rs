use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Service banner returned from `/`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    #[schema(example = "API Marketplace backend is running")]
    pub message: String,
}

/// Outcome of probing the document store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Unavailable,
}

/// Store diagnostics returned from `/test`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiagnosticsResponse {
    /// Name of the serving application
    #[schema(example = "marketplace")]
    pub backend: String,
    /// Document store backend in use
    #[schema(example = "postgres")]
    pub database: String,
    /// Connection URL with the password redacted (absent for the in-memory store)
    pub database_url: Option<String>,
    pub database_name: String,
    pub connection_status: ConnectionStatus,
    /// Collections holding at least one document
    pub collections: Vec<String>,
}

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Invalid rating: must be between 1 and 5")]
    pub message: String,
    /// Offending request field, for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}
