use crate::error::Result;
use crate::page::PageSelector;
use async_trait::async_trait;
use std::time::Duration;

/// Raw quote-block fragments scraped from one page, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
    /// The page the fragments came from (random selectors already resolved).
    pub page: u32,
    pub fragments: Vec<String>,
}

impl Fragments {
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Anything that can supply quote-block fragments for a page.
///
/// Implemented by [`FetchClient`](crate::FetchClient) for the real endpoint,
/// and by `MockSource` (behind the `mock` feature) for tests.
#[async_trait]
pub trait FragmentSource: Send + Sync {
    /// Base URL of the scraped site, used to resolve relative links.
    fn source_url(&self) -> &str;

    /// Fetch every quote-block fragment on the selected page.
    ///
    /// `wait` is how long the remote renderer should wait after navigation
    /// before extracting.
    async fn fetch_page(&self, page: PageSelector, wait: Duration) -> Result<Fragments>;

    /// Check whether the endpoint is reachable at all.
    async fn probe(&self) -> Result<()>;
}
