//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `exerciser_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use exerciser_core::storage::{Result, StoreError};
use exerciser_core::table::TableStatus;

const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";

/// Map any operation's SDK error to StoreError.
///
/// Service errors keep their error code; everything that never got a
/// service response (dispatch, timeout, credentials, unparseable response)
/// becomes `Transport`.
pub fn map_sdk_error<E, R>(
    err: SdkError<E, R>,
    operation: &'static str,
    table_name: &str,
) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    if let Some(service_err) = err.as_service_error() {
        let code = service_err.code().unwrap_or("Unknown");
        if code == RESOURCE_NOT_FOUND {
            return StoreError::TableNotFound {
                table_name: table_name.to_string(),
            };
        }
        return StoreError::Service {
            operation,
            code: code.to_string(),
            message: service_err.message().unwrap_or_default().to_string(),
        };
    }

    StoreError::Transport {
        operation,
        message: DisplayErrorContext(&err).to_string(),
    }
}

/// Classify a DescribeTable failure: resource-not-found means the table is
/// missing, anything else is an error.
pub fn classify_describe_error<R>(
    err: SdkError<DescribeTableError, R>,
    table_name: &str,
) -> Result<TableStatus>
where
    R: Debug + Send + Sync + 'static,
{
    if matches!(
        err.as_service_error(),
        Some(DescribeTableError::ResourceNotFoundException(_))
    ) {
        return Ok(TableStatus::Missing);
    }
    Err(map_sdk_error(err, "DescribeTable", table_name))
}

/// Map a request builder validation error to StoreError.
pub fn map_build_error(err: impl std::fmt::Display) -> StoreError {
    StoreError::InvalidRequest(err.to_string())
}
