//! Rotation Error Types
//!
//! Both variants mean the caller asked for something it should have checked
//! first; they are reported to the user rather than treated as crashes.

use derive_more::{Display, Error};

/// A rotation error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for rotation operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// There are no quotes to pick from.
    #[display("no quotes available")]
    EmptySet,
    /// A history index past the end of the history.
    #[display("history index {index} out of range (history has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
