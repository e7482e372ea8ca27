//! Errors raised by the time-series pipeline
//!
//! Everything here is computed from data that has already been fetched, so
//! none of these errors are worth retrying.

use thiserror::Error;

/// Time-series pipeline errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// The block's (start, end, interval) triple does not describe a whole
    /// number of samples
    #[error("Malformed time-series block: {0}")]
    MalformedBlock(String),

    /// A value column does not line up with the sample instants
    #[error("Column {column} has {actual} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// A requested variable is absent from the block
    #[error("Variable {0} missing from time-series block")]
    MissingVariable(String),

    /// No daily record falls inside the summary window
    #[error("No daily records inside the summary window")]
    EmptyWindow,

    /// The configured window length cannot be added to the request time
    #[error("Summary window of {0} days is out of range")]
    InvalidWindow(i64),

    /// A series that must be reduced has no samples at all
    #[error("Series {0} has no samples")]
    EmptySeries(String),
}

impl SeriesError {
    /// Whether the error signals a broken contract between the provider
    /// payload and the pipeline, as opposed to simply missing data
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            SeriesError::MalformedBlock(_)
                | SeriesError::LengthMismatch { .. }
                | SeriesError::MissingVariable(_)
        )
    }
}

/// Result type alias for the pipeline
pub type SeriesResult<T> = Result<T, SeriesError>;
