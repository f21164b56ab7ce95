//! Cache Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use quotewall_fetch::error::{Error as FetchError, ErrorKind as FetchErrorKind};

/// A cache error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a refresh could not produce a new working set.
///
/// The cache manager never hands these to its caller; they end up as a
/// `Degraded` state and a status message.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The remote fetch failed
    #[display("{_0}")]
    Fetch(#[error(not(source))] FetchErrorKind),
    /// The fetch succeeded but not a single fragment could be parsed
    #[display("no quotes found on page {_0}")]
    NoQuotes(#[error(not(source))] u32),
}

impl ErrorKind {
    /// Convert a fetch error into a cache error, preserving the fetch
    /// crate's `Exn` frame as a child in its own error tree.
    #[track_caller]
    pub fn fetch(err: FetchError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Fetch(inner))
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch(kind) => kind.is_retryable(),
            Self::NoQuotes(_) => false,
        }
    }
}
