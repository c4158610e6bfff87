mod error;
mod traits;
mod types;

pub use error::{ConversionError, Result, StoreError};
pub use traits::TableStore;
pub use types::{BatchGetOutcome, BatchWriteOutcome};

#[cfg(test)]
pub(crate) mod testing;
