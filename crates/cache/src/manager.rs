use crate::error::{ErrorKind, Result};
use crate::fallback::fallback_quotes;
use crate::record::CacheRecord;
use crate::set::QuoteSet;
use crate::state::{CacheState, Status};
use quotewall_extract::Extractor;
use quotewall_fetch::{FragmentSource, PageSelector};
use quotewall_storage::{Store, keys};
use std::time::Duration;
use time::OffsetDateTime;
use tracing::{Span, instrument};

/// Decides between serving cached quotes and fetching new ones, and owns the
/// working set that results.
///
/// Every operation reports its outcome as a [`Status`]; failures become a
/// [`CacheState::Degraded`] state rather than errors, so callers always end
/// up with something to show.
pub struct CacheManager<S> {
    source: S,
    store: Store,
    freshness: Duration,
    state: CacheState,
    quotes: QuoteSet,
    fetched_at: Option<OffsetDateTime>,
    page: Option<u32>,
}

impl<S: FragmentSource> CacheManager<S> {
    pub fn new(source: S, store: Store, freshness: Duration) -> Self {
        Self {
            source,
            store,
            freshness,
            state: CacheState::Idle,
            quotes: QuoteSet::empty(),
            fetched_at: None,
            page: None,
        }
    }

    pub fn state(&self) -> CacheState {
        self.state
    }

    /// The current working set; empty while idle.
    pub fn quotes(&self) -> QuoteSet {
        self.quotes.clone()
    }

    pub fn count(&self) -> usize {
        self.quotes.len()
    }

    /// Page the current working set was scraped from.
    pub fn page(&self) -> Option<u32> {
        self.page
    }

    /// When the current working set was fetched; `None` for built-in quotes.
    pub fn fetched_at(&self) -> Option<OffsetDateTime> {
        self.fetched_at
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn startup(&mut self, page: PageSelector, wait: Duration) -> Status {
        self.startup_at(OffsetDateTime::now_utc(), page, wait).await
    }

    /// Serve the persisted record if it is still fresh at `now`, otherwise
    /// fetch.
    ///
    /// A stale record is still installed before fetching, so a failed fetch
    /// degrades to the stale quotes instead of the built-in ones.
    #[instrument(skip(self))]
    pub async fn startup_at(&mut self, now: OffsetDateTime, page: PageSelector, wait: Duration) -> Status {
        if let Some(record) = self.load_record().await {
            if record.is_fresh(now, self.freshness) {
                self.install(record);
                self.state = CacheState::Ready;
                return Status::info(self.state, "Loaded quotes from cache");
            }
            tracing::info!(fetched_at = %record.fetched_at, "Cached quotes are stale, fetching new ones");
            self.install(record);
        }
        self.refresh_at(now, page, wait).await
    }

    pub async fn refresh(&mut self, page: PageSelector, wait: Duration) -> Status {
        self.refresh_at(OffsetDateTime::now_utc(), page, wait).await
    }

    /// Fetch, parse and install a new working set, stamped as fetched at
    /// `now`.
    #[instrument(skip(self), fields(quotes))]
    pub async fn refresh_at(&mut self, now: OffsetDateTime, page: PageSelector, wait: Duration) -> Status {
        self.state = CacheState::Loading;
        match self.fetch(page, wait).await {
            Ok((quotes, page)) => {
                let count = quotes.len();
                Span::current().record("quotes", count);
                let record = CacheRecord {
                    quotes: quotes.to_vec(),
                    fetched_at: now,
                    page: Some(page),
                };
                if let Err(e) = self.store.save(keys::CACHE_RECORD, &record).await {
                    tracing::warn!(error = %e, "Failed to persist fetched quotes");
                }
                self.quotes = quotes;
                self.fetched_at = Some(now);
                self.page = Some(page);
                self.state = CacheState::Ready;
                Status::success(self.state, format!("Successfully scraped {count} quotes from page {page}"))
            },
            Err(e) => {
                tracing::warn!(error = %e, retryable = e.is_retryable(), "Scraping failed");
                self.state = CacheState::Degraded;
                if self.quotes.is_empty() {
                    self.install_fallback();
                    Status::error(self.state, format!("Scraping failed: {}. Using fallback quotes.", &*e))
                } else {
                    Status::warning(self.state, format!("Scraping failed: {}. Using cached quotes.", &*e))
                }
            },
        }
    }

    /// Replace the working set with the built-in quotes.
    pub fn install_fallback(&mut self) {
        self.quotes = fallback_quotes();
        self.fetched_at = None;
        self.page = None;
        self.state = CacheState::Degraded;
    }

    /// Forget the persisted record and drop the working set.
    #[instrument(skip(self))]
    pub async fn clear(&mut self) {
        if let Err(e) = self.store.forget(keys::CACHE_RECORD).await {
            tracing::warn!(error = %e, "Failed to remove persisted quotes");
        }
        self.quotes = QuoteSet::empty();
        self.fetched_at = None;
        self.page = None;
        self.state = CacheState::Idle;
    }

    async fn fetch(&self, page: PageSelector, wait: Duration) -> Result<(QuoteSet, u32)> {
        let fragments = self.source.fetch_page(page, wait).await.map_err(ErrorKind::fetch)?;
        let quotes: QuoteSet = Extractor::new(self.source.source_url())
            .with_page(fragments.page)
            .quotes(&fragments.fragments)
            .into();
        if quotes.is_empty() {
            exn::bail!(ErrorKind::NoQuotes(fragments.page));
        }
        Ok((quotes, fragments.page))
    }

    /// The persisted record, if there is a usable one.
    async fn load_record(&self) -> Option<CacheRecord> {
        match self.store.load::<CacheRecord>(keys::CACHE_RECORD).await {
            Ok(Some(record)) if !record.quotes.is_empty() => Some(record),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable cached quotes");
                None
            },
        }
    }

    fn install(&mut self, record: CacheRecord) {
        self.quotes = record.quotes.into();
        self.fetched_at = Some(record.fetched_at);
        self.page = record.page;
    }
}
