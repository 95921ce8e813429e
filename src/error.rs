//! Error types for the log parser library.

use thiserror::Error;

/// Result type alias for parsing and statistics operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing a log or computing statistics.
///
/// Only [`Error::Io`] is fatal to a run. Unresolvable addresses and
/// malformed timestamps drop the affected line and processing continues;
/// [`Error::DivisionUndefined`] marks a ratio whose totals are all zero.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while reading the log or writing an export
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Hardware address missing from the deployment table (testbed mode)
    #[error("address {0} not found in the deployment table")]
    AddressNotFound(String),

    /// Line matched a pattern but its timestamp field is not a valid date-time
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Every group total is zero, the ratio has no defined value
    #[error("all totals are zero, ratio is undefined")]
    DivisionUndefined,
}
