//! Fetch Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A fetch error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a fetch failed.
///
/// Callers deciding what to do next only need to know that the fetch failed;
/// the variants exist so the cause can be reported in a human-readable way.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The endpoint could not be reached, or did not answer in time
    #[display("network error: {_0}")]
    Transport(#[error(not(source))] String),
    /// The endpoint answered with a non-success HTTP status
    #[display("API error: {_0}")]
    Status(#[error(not(source))] u16),
    /// The endpoint answered, but reported that scraping failed
    #[display("scrape rejected: {_0}")]
    Rejected(#[error(not(source))] String),
    /// The response body did not have the expected shape
    #[display("malformed response: {_0}")]
    MalformedPayload(#[error(not(source))] String),
    /// The request could not be built (bad page selector, bad endpoint URL)
    #[display("invalid request: {_0}")]
    InvalidRequest(#[error(not(source))] String),
}

impl ErrorKind {
    /// Convert an HTTP client error into a transport error, keeping the
    /// client error as a child frame.
    #[track_caller]
    pub(crate) fn transport(err: reqwest::Error) -> Error {
        let cause = if err.is_timeout() {
            "request timed out".to_string()
        } else {
            err.to_string()
        };
        exn::Exn::from(err).raise(Self::Transport(cause))
    }

    /// Convert a body decoding error into a malformed payload error.
    #[track_caller]
    pub(crate) fn malformed(err: reqwest::Error) -> Error {
        let cause = err.to_string();
        exn::Exn::from(err).raise(Self::MalformedPayload(cause))
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status(status) => *status == 429 || *status >= 500,
            Self::Rejected(_) | Self::MalformedPayload(_) | Self::InvalidRequest(_) => false,
        }
    }
}
