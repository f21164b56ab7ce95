use quotewall_extract::models::Quote;
use std::ops::Deref;
use std::sync::Arc;

/// An immutable working set of quotes.
///
/// Cloning is cheap and shares the underlying quotes. A new fetch produces a
/// new set rather than changing an existing one, so a clone taken before a
/// refresh keeps seeing exactly the quotes it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteSet {
    quotes: Arc<[Quote]>,
}

impl QuoteSet {
    pub fn new(quotes: impl Into<Arc<[Quote]>>) -> Self {
        Self { quotes: quotes.into() }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn as_slice(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn to_vec(&self) -> Vec<Quote> {
        self.quotes.to_vec()
    }
}

impl Default for QuoteSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for QuoteSet {
    type Target = [Quote];

    fn deref(&self) -> &[Quote] {
        &self.quotes
    }
}

impl From<Vec<Quote>> for QuoteSet {
    fn from(quotes: Vec<Quote>) -> Self {
        Self::new(quotes)
    }
}

impl FromIterator<Quote> for QuoteSet {
    fn from_iter<I: IntoIterator<Item = Quote>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}
