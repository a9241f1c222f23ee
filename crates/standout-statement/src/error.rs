//! Error types for the statement crate.

use thiserror::Error;

/// Errors that can occur when configuring statements or iterating results.
#[derive(Debug, Error)]
pub enum StatementError {
    /// Offset below zero.
    #[error("invalid offset {0}: the offset must be greater than or equal to 0")]
    InvalidOffset(i64),

    /// Limit below the unbounded sentinel (-1).
    #[error("invalid limit {0}: the limit must be greater than or equal to -1")]
    InvalidLimit(i64),

    /// A zero-length window was requested past the first record under
    /// [`BoundsPolicy::Strict`](crate::BoundsPolicy::Strict).
    #[error("cannot seek to offset {offset} in a zero-length window")]
    OutOfRange { offset: usize },

    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// The delimited-text document could not be parsed.
    #[error("failed to read delimited text: {0}")]
    ParseError(String),
}

#[cfg(feature = "csv")]
impl From<csv::Error> for StatementError {
    fn from(err: csv::Error) -> Self {
        StatementError::ParseError(err.to_string())
    }
}

impl StatementError {
    /// Returns `true` for errors raised by rejected window arguments.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            StatementError::InvalidOffset(_) | StatementError::InvalidLimit(_)
        )
    }

    /// Returns `true` for strict-bounds iteration failures.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, StatementError::OutOfRange { .. })
    }
}

/// Result type for statement operations.
pub type Result<T> = std::result::Result<T, StatementError>;
