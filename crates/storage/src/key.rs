//! Key validation.
//!
//! Keys double as file names for the local backend, so they are restricted to
//! a conservative character set that can never escape the storage root.

use crate::error::{ErrorKind, Result};

const MAX_KEY_LENGTH: usize = 128;

/// Validates a storage key.
///
/// Keys must be non-empty, at most 128 bytes, consist only of ASCII
/// alphanumerics, `-`, `_` and `.`, and must not start with a `.` (no hidden
/// files, no `..`).
///
/// # Examples
///
/// ```
/// use quotewall_storage::validate_key;
/// assert!(validate_key("quotewall.history").is_ok());
/// assert!(validate_key("rotation_counter").is_ok());
/// assert!(validate_key("").is_err());
/// assert!(validate_key("../escape").is_err());
/// assert!(validate_key(".hidden").is_err());
/// ```
pub fn validate(key: &str) -> Result<&str> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');
    if key.is_empty() || key.len() > MAX_KEY_LENGTH || key.starts_with('.') || !key.chars().all(allowed) {
        exn::bail!(ErrorKind::InvalidKey(key.to_string()));
    }
    Ok(key)
}
