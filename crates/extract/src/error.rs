//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Every variant means the same thing to a batch caller: skip this fragment
/// and carry on with the next one.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The fragment contained nothing but whitespace.
    #[display("empty HTML fragment")]
    EmptyFragment,
    /// A required field could not be found in the fragment.
    #[display("missing required field: {_0}")]
    MissingField(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // There are no retryable errors in this crate, the fragment either
        // contains a quote or it doesn't.
        false
    }
}
