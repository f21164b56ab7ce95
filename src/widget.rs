use crate::error::{ErrorKind, Result};
use crate::presenter::Presenter;
use crate::store::open_store;
use quotewall_cache::{CacheManager, CacheState, QuoteSet, Status};
use quotewall_config::Config;
use quotewall_extract::models::Quote;
use quotewall_fetch::payload::Viewport;
use quotewall_fetch::{ClientOptions, FetchClient, FragmentSource, PageSelector};
use quotewall_rotation::{History, RotationEngine};
use quotewall_storage::Store;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::instrument;

const NO_QUOTES: &str = "No quotes available. Please scrape first.";

/// Behaviour knobs for a [`Widget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Page selector used at startup and until the next rescrape.
    pub page: PageSelector,
    /// Render wait passed to the scraping endpoint.
    pub wait: Duration,
    /// How long a persisted working set stays fresh.
    pub freshness: Duration,
    pub history_capacity: usize,
    pub dedup_on_repeat: bool,
}

impl Options {
    /// Options described by `config`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Client`] if `source.page` is neither `"random"` nor a
    /// page inside the configured page range.
    pub fn from_config(config: &Config) -> Result<Self> {
        let page: PageSelector = config.source.page.parse().map_err(ErrorKind::client)?;
        page.check(&config.page_range()).map_err(ErrorKind::client)?;
        Ok(Self {
            page,
            wait: config.wait_time(),
            freshness: config.freshness(),
            history_capacity: config.history.capacity,
            dedup_on_repeat: config.history.dedup_on_repeat,
        })
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            page: PageSelector::default(),
            wait: Duration::from_secs(1),
            freshness: Duration::from_secs(24 * 60 * 60),
            history_capacity: 15,
            dedup_on_repeat: true,
        }
    }
}

fn client_options(config: &Config) -> ClientOptions {
    ClientOptions {
        endpoint: config.endpoint.url.clone(),
        source_url: config.source.base_url.clone(),
        pages: config.page_range(),
        timeout: config.timeout(),
        wait_until: config.endpoint.wait_until.clone(),
        viewport: Some(Viewport {
            width: config.endpoint.viewport.width,
            height: config.endpoint.viewport.height,
        }),
    }
}

/// The quote widget core.
///
/// Owns the cache manager and the rotation engine and drives a
/// [`Presenter`]. Every `request_*` method reports what happened through the
/// presenter; return values are a convenience for hosts that want them.
pub struct Widget<S, P, R = StdRng> {
    cache: CacheManager<S>,
    rotation: RotationEngine<R>,
    presenter: P,
    page: PageSelector,
    wait: Duration,
}

impl<P: Presenter> Widget<FetchClient, P> {
    /// Build a widget talking to the real endpoint, persisting wherever
    /// `config` says.
    #[instrument(skip_all)]
    pub async fn open(config: &Config, presenter: P) -> Result<Self> {
        config.validate().map_err(ErrorKind::config)?;
        let options = Options::from_config(config)?;
        let client = FetchClient::new(client_options(config)).map_err(ErrorKind::client)?;
        Ok(Self::new(client, open_store(config), options, presenter).await)
    }
}

impl<S: FragmentSource, P: Presenter> Widget<S, P> {
    pub async fn new(source: S, store: Store, options: Options, presenter: P) -> Self {
        Self::with_rng(source, store, options, presenter, StdRng::from_os_rng()).await
    }
}

impl<S: FragmentSource, P: Presenter, R: Rng> Widget<S, P, R> {
    /// Like [`Widget::new`], with a caller-supplied random source for quote
    /// selection.
    pub async fn with_rng(source: S, store: Store, options: Options, presenter: P, rng: R) -> Self {
        let rotation =
            RotationEngine::load_with_rng(store.clone(), options.history_capacity, options.dedup_on_repeat, rng).await;
        Self {
            cache: CacheManager::new(source, store, options.freshness),
            rotation,
            presenter,
            page: options.page,
            wait: options.wait,
        }
    }

    /// Load quotes (from the store if fresh, otherwise from the endpoint) and
    /// show the first one.
    #[instrument(skip(self))]
    pub async fn startup(&mut self) -> Option<Quote> {
        self.presenter.on_history_changed(self.rotation.history());
        let status = self.cache.startup(self.page, self.wait).await;
        self.presenter.on_status_change(&status);
        self.show_next().await
    }

    /// Show a random quote from the working set.
    #[instrument(skip(self))]
    pub async fn request_new_quote(&mut self) -> Option<Quote> {
        self.show_next().await
    }

    /// Show the quote at `index` in the history (0 is the most recent)
    /// without recording it again.
    #[instrument(skip(self))]
    pub fn request_history_quote(&mut self, index: usize) -> Option<Quote> {
        match self.rotation.load_from_history(index) {
            Ok(quote) => {
                self.presenter.on_quote_ready(&quote);
                self.notify(Status::info(self.cache.state(), "Loaded quote from history"));
                Some(quote)
            },
            Err(e) => {
                tracing::warn!(error = %e, "Cannot load quote from history");
                self.notify(Status::error(self.cache.state(), (*e).to_string()));
                None
            },
        }
    }

    /// Fetch a new working set from `page` and show a quote from it.
    ///
    /// `page` and `wait` become the defaults for later fetches.
    #[instrument(skip(self))]
    pub async fn request_rescrape(&mut self, page: PageSelector, wait: Duration) -> Option<Quote> {
        self.page = page;
        self.wait = wait;
        self.notify(Status::info(CacheState::Loading, format!("Scraping quotes from page {page}...")));
        let status = self.cache.refresh(page, wait).await;
        self.notify(status);
        self.show_next().await
    }

    /// Forget cached quotes, history and counter, in memory and in the store.
    #[instrument(skip(self))]
    pub async fn request_cache_clear(&mut self) {
        self.cache.clear().await;
        self.rotation.reset().await;
        self.presenter.on_history_changed(self.rotation.history());
        self.notify(Status::info(self.cache.state(), "Cache cleared"));
    }

    /// Serve the built-in quotes until the next successful fetch.
    pub fn use_fallback_quotes(&mut self) {
        self.cache.install_fallback();
        self.notify(Status::warning(self.cache.state(), "Using fallback quotes."));
    }

    /// Check whether the scraping endpoint is reachable. Does not change the
    /// cache state.
    #[instrument(skip(self))]
    pub async fn request_probe(&mut self) -> bool {
        let state = self.cache.state();
        self.notify(Status::info(state, "Testing API connection..."));
        match self.cache.source().probe().await {
            Ok(()) => {
                self.notify(Status::success(state, "API connection successful!"));
                true
            },
            Err(e) => {
                tracing::warn!(error = %e, "API probe failed");
                self.notify(Status::error(state, format!("API connection failed: {}", &*e)));
                false
            },
        }
    }

    pub fn state(&self) -> CacheState {
        self.cache.state()
    }

    pub fn quotes(&self) -> QuoteSet {
        self.cache.quotes()
    }

    pub fn cache(&self) -> &CacheManager<S> {
        &self.cache
    }

    pub fn history(&self) -> &History {
        self.rotation.history()
    }

    /// Number of quotes shown so far.
    pub fn counter(&self) -> u64 {
        self.rotation.counter()
    }

    pub fn page(&self) -> PageSelector {
        self.page
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    async fn show_next(&mut self) -> Option<Quote> {
        let quotes = self.cache.quotes();
        match self.rotation.pick_next(&quotes).await {
            Ok(quote) => {
                self.presenter.on_quote_ready(&quote);
                self.presenter.on_history_changed(self.rotation.history());
                Some(quote)
            },
            Err(e) => {
                tracing::warn!(error = %e, "No quote to show");
                self.notify(Status::warning(self.cache.state(), NO_QUOTES));
                None
            },
        }
    }

    fn notify(&mut self, status: Status) {
        self.presenter.on_status_change(&status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotewall_cache::{Level, fallback_quotes};
    use quotewall_fetch::MockSource;
    use quotewall_fetch::error::ErrorKind as FetchErrorKind;
    use quotewall_storage::backend::MemoryBackend;
    use rstest::rstest;
    use std::sync::Arc;
    use tempfile::TempDir;

    const HI: &str = r#"<div class='quote'><span class='text'>"Hi"</span><small class='author'>A</small></div>"#;
    const BYE: &str = r#"<div class='quote'><span class='text'>"Bye"</span><small class='author'>B</small></div>"#;

    #[derive(Default)]
    struct Recorder {
        shown: Vec<Quote>,
        statuses: Vec<Status>,
        history_lengths: Vec<usize>,
    }

    impl Recorder {
        fn last_status(&self) -> &Status {
            self.statuses.last().unwrap()
        }
    }

    impl Presenter for Recorder {
        fn on_quote_ready(&mut self, quote: &Quote) {
            self.shown.push(quote.clone());
        }

        fn on_status_change(&mut self, status: &Status) {
            self.statuses.push(status.clone());
        }

        fn on_history_changed(&mut self, history: &History) {
            self.history_lengths.push(history.len());
        }
    }

    fn store() -> Store {
        Store::new(Arc::new(MemoryBackend::default()))
    }

    async fn build(source: MockSource, store: Store) -> Widget<MockSource, Recorder> {
        Widget::with_rng(source, store, Options::default(), Recorder::default(), StdRng::seed_from_u64(3)).await
    }

    #[tokio::test]
    async fn test_startup_shows_scraped_quote() {
        let mut widget = build(MockSource::new().then_fragments(1, [HI]), store()).await;

        let quote = widget.startup().await.unwrap();

        assert_eq!(quote.text(), "Hi");
        assert_eq!(quote.author(), "A");
        assert_eq!(widget.state(), CacheState::Ready);
        assert_eq!(widget.counter(), 1);
        let presenter = widget.presenter();
        assert_eq!(presenter.shown, vec![quote]);
        assert_eq!(presenter.last_status().message, "Successfully scraped 1 quotes from page 1");
        assert_eq!(presenter.history_lengths, vec![0, 1]);
    }

    #[tokio::test]
    async fn test_startup_http_error_uses_fallback() {
        let mut widget = build(MockSource::new().then_fail(FetchErrorKind::Status(500)), store()).await;

        let quote = widget.startup().await.unwrap();

        assert_eq!(widget.state(), CacheState::Degraded);
        assert!(fallback_quotes().contains(&quote));
        let status = &widget.presenter().statuses[0];
        assert_eq!(status.level, Level::Error);
        assert_eq!(status.message, "Scraping failed: API error: 500. Using fallback quotes.");
    }

    #[tokio::test]
    async fn test_second_startup_served_from_store() {
        let store = store();
        let mut first = build(MockSource::new().then_fragments(1, [HI, BYE]), store.clone()).await;
        first.startup().await.unwrap();

        let mut second = build(MockSource::new(), store).await;
        second.startup().await.unwrap();

        assert_eq!(second.cache().source().calls(), 0);
        assert_eq!(second.presenter().statuses[0].message, "Loaded quotes from cache");
        assert_eq!(second.quotes(), first.quotes());
        assert_eq!(second.counter(), 2);
        assert_eq!(second.presenter().history_lengths[0], 1);
    }

    #[tokio::test]
    async fn test_history_quote_does_not_rotate() {
        let mut widget = build(MockSource::new().then_fragments(1, [HI, BYE]), store()).await;
        widget.startup().await;
        widget.request_new_quote().await;
        widget.request_new_quote().await;
        let counter = widget.counter();
        let history = widget.history().clone();

        let last = history.len() - 1;
        let quote = widget.request_history_quote(last).unwrap();

        assert_eq!(quote, history.get(last).unwrap().quote);
        assert_eq!(widget.counter(), counter);
        assert_eq!(widget.history(), &history);
        assert_eq!(widget.presenter().shown.last(), Some(&quote));
        assert_eq!(widget.presenter().last_status().message, "Loaded quote from history");
    }

    #[tokio::test]
    async fn test_history_quote_out_of_range() {
        let mut widget = build(MockSource::new(), store()).await;
        assert!(widget.request_history_quote(0).is_none());
        let status = widget.presenter().last_status();
        assert_eq!(status.level, Level::Error);
        assert_eq!(status.message, "history index 0 out of range (history has 0 entries)");
        assert!(widget.presenter().shown.is_empty());
    }

    #[tokio::test]
    async fn test_clear_then_pick_needs_fallback() {
        let store = store();
        let mut widget = build(MockSource::new().then_fragments(1, [HI]), store.clone()).await;
        widget.startup().await;

        widget.request_cache_clear().await;

        assert_eq!(widget.state(), CacheState::Idle);
        assert_eq!(widget.counter(), 0);
        assert!(widget.history().is_empty());
        assert_eq!(widget.presenter().history_lengths.last(), Some(&0));
        assert!(store.backend().get("quotewall.cache").await.unwrap().is_none());
        assert!(store.backend().get("quotewall.history").await.unwrap().is_none());

        assert!(widget.request_new_quote().await.is_none());
        let status = widget.presenter().last_status();
        assert_eq!(status.level, Level::Warning);
        assert_eq!(status.message, NO_QUOTES);

        widget.use_fallback_quotes();
        let quote = widget.request_new_quote().await.unwrap();
        assert!(fallback_quotes().contains(&quote));
        assert_eq!(widget.counter(), 1);
    }

    #[tokio::test]
    async fn test_rescrape() {
        let source = MockSource::new().then_fragments(1, [HI]).then_fragments(7, [BYE]);
        let mut widget = build(source, store()).await;
        widget.startup().await;

        let quote = widget.request_rescrape(PageSelector::Random, Duration::from_millis(2_500)).await.unwrap();

        assert_eq!(quote.text(), "Bye");
        assert_eq!(quote.source_page(), Some(7));
        assert_eq!(widget.page(), PageSelector::Random);
        assert_eq!(widget.wait(), Duration::from_millis(2_500));
        assert_eq!(widget.cache().page(), Some(7));
        assert_eq!(
            widget.cache().source().requests()[1],
            (PageSelector::Random, Duration::from_millis(2_500))
        );
        let messages: Vec<&str> = widget.presenter().statuses.iter().map(|s| s.message.as_str()).collect();
        assert!(messages.contains(&"Scraping quotes from page random..."));
        assert!(messages.contains(&"Successfully scraped 1 quotes from page 7"));
    }

    #[tokio::test]
    async fn test_probe() {
        let mut widget = build(MockSource::new(), store()).await;
        assert!(widget.request_probe().await);
        assert_eq!(widget.presenter().last_status().message, "API connection successful!");
        assert_eq!(widget.state(), CacheState::Idle);

        let source = MockSource::new().with_probe_failure(FetchErrorKind::Status(405));
        let mut widget = build(source, store()).await;
        assert!(!widget.request_probe().await);
        let status = widget.presenter().last_status();
        assert_eq!(status.level, Level::Error);
        assert_eq!(status.message, "API connection failed: API error: 405");
    }

    #[tokio::test]
    async fn test_open_from_config() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.directory = Some(dir.path().to_path_buf());
        config.source.page = "random".to_string();

        let widget = Widget::open(&config, Recorder::default()).await.unwrap();

        assert_eq!(widget.page(), PageSelector::Random);
        assert_eq!(widget.state(), CacheState::Idle);
        assert_eq!(widget.cache().source().options().pages, 1..=10);
    }

    #[rstest]
    #[case("random", PageSelector::Random)]
    #[case("RANDOM", PageSelector::Random)]
    #[case("10", PageSelector::Page(10))]
    fn test_options_page_from_config(#[case] page: &str, #[case] expected: PageSelector) {
        let mut config = Config::default();
        config.source.page = page.to_string();
        assert_eq!(Options::from_config(&config).unwrap().page, expected);
    }

    #[rstest]
    #[case::out_of_range("11")]
    #[case::zero("0")]
    #[case::not_a_number("latest")]
    fn test_options_reject_bad_page(#[case] page: &str) {
        let mut config = Config::default();
        config.source.page = page.to_string();
        let err = Options::from_config(&config).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Client(FetchErrorKind::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_open_rejects_invalid_config() {
        let mut config = Config::default();
        config.history.capacity = 0;
        let err = Widget::open(&config, Recorder::default()).await.err().unwrap();
        assert!(matches!(&*err, ErrorKind::Config(_)));
    }
}
