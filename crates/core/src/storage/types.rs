use serde::Serialize;

use crate::record::Record;

/// Result of a single batch write round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchWriteOutcome {
    /// Records the service did not write and expects to be resubmitted.
    pub unprocessed: Vec<Record>,
}

/// Result of a single batch get round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchGetOutcome {
    pub records: Vec<Record>,
    /// Keys the service did not read and expects to be resubmitted.
    pub unprocessed: Vec<String>,
}
