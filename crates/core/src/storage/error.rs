use thiserror::Error;

/// Errors raised while converting records to or from the wire attribute map.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Expected an object at the top level, got {0}")]
    NotAnObject(&'static str),
    #[error("Unsupported attribute type for '{attribute}': {kind}")]
    UnsupportedAttribute {
        attribute: String,
        kind: &'static str,
    },
    #[error("Invalid number '{value}' for '{attribute}'")]
    InvalidNumber { attribute: String, value: String },
    #[error("Failed to serialize record: {0}")]
    Serialize(String),
    #[error("Failed to deserialize record: {0}")]
    Deserialize(String),
}

/// Errors that can occur during table store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{operation} could not reach the service: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },
    #[error("{operation} rejected by the service ({code}): {message}")]
    Service {
        operation: &'static str,
        code: String,
        message: String,
    },
    #[error("Table '{table_name}' not found")]
    TableNotFound { table_name: String },
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("{operation} left {remaining} item(s) unprocessed after retries")]
    UnprocessedAfterRetries {
        operation: &'static str,
        remaining: usize,
    },
    #[error("Timeout waiting for table '{table_name}' to become active")]
    TableActivationTimeout { table_name: String },
    #[error("Timeout waiting for table '{table_name}' to finish deleting")]
    TableDeletionTimeout { table_name: String },
}

/// Result type for table store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
