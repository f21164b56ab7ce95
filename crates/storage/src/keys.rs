//! Key names for persisted widget state.

/// Cached quote set together with the instant it was fetched.
pub const CACHE_RECORD: &str = "quotewall.cache";
/// Number of quotes shown so far.
pub const ROTATION_COUNTER: &str = "quotewall.counter";
/// Most-recent-first list of shown quotes.
pub const HISTORY: &str = "quotewall.history";
