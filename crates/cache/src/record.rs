use quotewall_extract::models::Quote;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;

/// The persisted working set, written as a single value so it is never
/// partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    pub quotes: Vec<Quote>,
    #[serde(with = "time::serde::rfc3339")]
    pub fetched_at: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl CacheRecord {
    /// Whether the record is younger than `window` at `now`.
    ///
    /// A record stamped in the future (clock moved backwards) is treated as
    /// stale.
    pub fn is_fresh(&self, now: OffsetDateTime, window: Duration) -> bool {
        let age = now - self.fetched_at;
        !age.is_negative() && age < window
    }
}
