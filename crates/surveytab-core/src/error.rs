//! Summary error types.
//!
//! These errors represent failures while resolving or summarizing a survey
//! item. Loading and configuration failures are reported through `anyhow`
//! with file context instead.

use thiserror::Error;

/// Errors that can occur while summarizing a survey item.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SummaryError {
    /// The prefix does not match any column in the data dictionary.
    #[error("the item '{0}' could not be found. Please check the data dictionary again")]
    ItemNotFound(String),

    /// A footer was requested without a counts table or an explicit count.
    #[error("a table or number must be supplied to count declined responses")]
    MissingTableOrCount,

    /// A dictionary column has no data in the response dataset.
    #[error("column '{0}' is described in the data dictionary but missing from the dataset")]
    MissingColumn(String),

    /// A ranked column holds a value that is not a number.
    #[error("column '{column}' holds non-numeric rank '{value}'")]
    InvalidRank { column: String, value: String },
}

impl SummaryError {
    /// Returns `true` if the error comes from the caller asking for an
    /// unknown item rather than from the data itself.
    pub fn is_lookup(&self) -> bool {
        matches!(self, SummaryError::ItemNotFound(_))
    }
}

/// Convenience alias used throughout the summary code.
pub type Result<T, E = SummaryError> = std::result::Result<T, E>;
