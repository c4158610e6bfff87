//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the `TableStore`
//! trait using `aws-sdk-dynamodb`.

mod client;
mod conversions;
mod error;
mod repository;

pub use client::{create_client, AwsConfig};
pub use repository::DynamoDbStore;
