use std::fmt::{Display, Formatter, Result as FmtResult};

/// Identifier of a single quote.
///
/// Generated from 64 random bits, which keeps collisions negligible for any
/// realistic number of quotes while staying cheap to compare and persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct QuoteId(u64);
impl QuoteId {
    /// Generate a new random identifier.
    pub fn generate() -> Self {
        Self(rand::random())
    }

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}
impl From<u64> for QuoteId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
impl Display for QuoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:016x}", self.0)
    }
}
