//! Configuration Error Types

use derive_more::{Display, Error};

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// One of the configuration sources could not be read or deserialized.
    #[display("could not load configuration: {_0}")]
    Load(#[error(not(source))] String),
    /// A value was loaded but is outside what the widget can work with.
    #[display("invalid configuration value for {field}: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Neither variant fixes itself without someone editing a file or
        // the environment.
        false
    }
}
