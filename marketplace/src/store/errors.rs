use thiserror::Error;

/// Unified error type for document store operations that application code can handle
#[derive(Error, Debug)]
pub enum StoreError {
    /// A filter used an operator outside the supported mini-language
    #[error("Unsupported filter operator {operator} on field {field}")]
    UnknownOperator { field: String, operator: String },

    /// A filter was structurally invalid (bad shape, bad regex, bad options)
    #[error("Invalid filter: {message}")]
    InvalidFilter { message: String },

    /// A record could not be turned into a document
    #[error("Failed to encode document for {collection}")]
    Encode {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stored document could not be decoded into its typed record
    #[error("Failed to decode document from {collection}")]
    Decode {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    /// Catch-all for non-recoverable backend errors (connection loss, rejected statements)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// All sqlx errors are non-recoverable from the application's point of view
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Other(anyhow::Error::from(err))
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Other(anyhow::Error::from(err))
    }
}

/// Type alias for store operation results
pub type Result<T> = std::result::Result<T, StoreError>;
