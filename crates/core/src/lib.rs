//! Functional core for the DynamoDB table exerciser.
//!
//! Holds the domain types, the `TableStore` seam every backend implements,
//! and the small amount of orchestration logic (batch retry loops, table
//! activation polling) that is independent of any particular backend.

pub mod batch;
pub mod record;
pub mod storage;
pub mod table;
