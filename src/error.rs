//! Widget Error Types
//!
//! Only setup can fail; once a widget exists, every failure is reported
//! through the [`Presenter`](crate::Presenter) instead.

use derive_more::{Display, Error};
use quotewall_config::error::{Error as ConfigError, ErrorKind as ConfigErrorKind};
use quotewall_fetch::error::{Error as FetchError, ErrorKind as FetchErrorKind};

/// A widget setup error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for widget setup.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration could not be loaded or is invalid
    #[display("{_0}")]
    Config(#[error(not(source))] ConfigErrorKind),
    /// The fetch client could not be set up from the configuration
    #[display("{_0}")]
    Client(#[error(not(source))] FetchErrorKind),
}

impl ErrorKind {
    #[track_caller]
    pub fn config(err: ConfigError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Config(inner))
    }

    #[track_caller]
    pub fn client(err: FetchError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Client(inner))
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
