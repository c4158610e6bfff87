//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `TableStore` trait
//! defined in `exerciser_core::storage`. The backend is picked at runtime
//! with `--backend`:
//!
//! - `dynamodb` (default): AWS DynamoDB via `aws-sdk-dynamodb`
//! - `memory`: in-process tables, for dry runs without AWS access

pub mod dynamodb;
pub mod inmemory;

pub use dynamodb::DynamoDbStore;
pub use inmemory::InMemoryStore;
