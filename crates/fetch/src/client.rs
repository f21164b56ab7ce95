use crate::error::{ErrorKind, Result};
use crate::page::PageSelector;
use crate::payload::{Extractors, RequestKind, ScrapeRequest, ScrapeResponse, Viewport};
use crate::source::{FragmentSource, Fragments};
use async_trait::async_trait;
use exn::ResultExt;
use reqwest::{Client, Method};
use std::ops::RangeInclusive;
use std::time::Duration;
use tracing::{Span, instrument};

pub const DEFAULT_ENDPOINT: &str = "https://api.devnova.icu/api/tools/puppeteer";
pub const DEFAULT_SOURCE_URL: &str = "https://quotes.toscrape.com";

/// Settings for [`FetchClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// URL of the remote scraping endpoint.
    pub endpoint: String,
    /// Base URL of the site being scraped.
    pub source_url: String,
    /// Valid page numbers on the source site.
    pub pages: RangeInclusive<u32>,
    /// Bound on the whole request, also sent as the remote navigation timeout.
    pub timeout: Duration,
    pub wait_until: String,
    pub viewport: Option<Viewport>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            source_url: DEFAULT_SOURCE_URL.to_string(),
            pages: 1..=10,
            timeout: Duration::from_secs(30),
            wait_until: "networkidle2".to_string(),
            viewport: Some(Viewport { width: 1920, height: 1080 }),
        }
    }
}

/// Client for the remote scraping endpoint.
///
/// Every fetch is one `POST` carrying a [`ScrapeRequest`]; the client never
/// retries on its own.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    options: ClientOptions,
}

impl FetchClient {
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidRequest`] if the endpoint URL is empty or
    /// the HTTP client cannot be initialised.
    pub fn new(options: ClientOptions) -> Result<Self> {
        if options.endpoint.trim().is_empty() {
            exn::bail!(ErrorKind::InvalidRequest("empty endpoint URL".to_string()));
        }
        let http = Client::builder()
            .timeout(options.timeout)
            .build()
            .or_raise(|| ErrorKind::InvalidRequest("could not initialise HTTP client".to_string()))?;
        Ok(Self { http, options })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// URL of a single page on the source site.
    pub fn page_url(&self, page: u32) -> String {
        format!("{}/page/{page}/", self.options.source_url.trim_end_matches('/'))
    }

    /// Build the request body for one page.
    pub fn request(&self, page: u32, wait: Duration) -> ScrapeRequest {
        ScrapeRequest {
            url: self.page_url(page),
            kind: RequestKind::Data,
            wait_until: self.options.wait_until.clone(),
            timeout: duration_ms(self.options.timeout),
            wait_for_timeout: duration_ms(wait),
            viewport: self.options.viewport,
            extractors: Extractors::quote_blocks(),
        }
    }

    fn resolve_page(&self, selector: PageSelector) -> Result<u32> {
        selector.resolve(&self.options.pages, &mut rand::rng())
    }
}

#[async_trait]
impl FragmentSource for FetchClient {
    fn source_url(&self) -> &str {
        &self.options.source_url
    }

    #[instrument(skip(self), fields(endpoint = %self.options.endpoint, page, fragments))]
    async fn fetch_page(&self, selector: PageSelector, wait: Duration) -> Result<Fragments> {
        let page = self.resolve_page(selector)?;
        Span::current().record("page", page);
        let request = self.request(page, wait);
        let response = self
            .http
            .post(&self.options.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(ErrorKind::transport)?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Status(status.as_u16()));
        }
        let body: ScrapeResponse = response.json().await.map_err(ErrorKind::malformed)?;
        let fragments = body.into_fragments()?;
        Span::current().record("fragments", fragments.len());
        Ok(Fragments { page, fragments })
    }

    #[instrument(skip(self), fields(endpoint = %self.options.endpoint))]
    async fn probe(&self) -> Result<()> {
        let response = self
            .http
            .request(Method::OPTIONS, &self.options.endpoint)
            .send()
            .await
            .map_err(ErrorKind::transport)?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Status(status.as_u16()));
        }
        Ok(())
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    const ENDPOINT_PATH: &str = "/api/tools/puppeteer";

    fn client(server: &Server) -> FetchClient {
        FetchClient::new(ClientOptions {
            endpoint: format!("{}{ENDPOINT_PATH}", server.url()),
            timeout: Duration::from_secs(5),
            ..ClientOptions::default()
        })
        .unwrap()
    }

    #[test]
    fn test_page_url() {
        let client = FetchClient::new(ClientOptions {
            source_url: "https://quotes.toscrape.com/".to_string(),
            ..ClientOptions::default()
        })
        .unwrap();
        assert_eq!(client.page_url(3), "https://quotes.toscrape.com/page/3/");
    }

    #[test]
    fn test_request_uses_options() {
        let client = FetchClient::new(ClientOptions::default()).unwrap();
        let request = client.request(2, Duration::from_millis(1_500));
        assert_eq!(request.url, "https://quotes.toscrape.com/page/2/");
        assert_eq!(request.timeout, 30_000);
        assert_eq!(request.wait_for_timeout, 1_500);
        assert_eq!(request.wait_until, "networkidle2");
        assert_eq!(request.viewport, Some(Viewport { width: 1920, height: 1080 }));
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let err = FetchClient::new(ClientOptions {
            endpoint: " ".to_string(),
            ..ClientOptions::default()
        })
        .unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_fetch_page_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", ENDPOINT_PATH)
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "url": "https://quotes.toscrape.com/page/4/",
                "type": "data",
                "waitForTimeout": 2000,
                "extractors": {"selectors": {"quotes": {"selector": ".quote", "multiple": true, "type": "html"}}},
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "success": true,
                    "data": {"standard": {"custom": {"quotes": [
                        "<div class='quote'><span class='text'>\"Hi\"</span><small class='author'>A</small></div>"
                    ]}}},
                })
                .to_string(),
            )
            .create_async()
            .await;

        let fragments = client(&server)
            .fetch_page(PageSelector::Page(4), Duration::from_secs(2))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(fragments.page, 4);
        assert_eq!(fragments.len(), 1);
        assert!(fragments.fragments[0].contains("\"Hi\""));
    }

    #[tokio::test]
    async fn test_fetch_random_page_stays_in_range() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", ENDPOINT_PATH)
            .with_status(200)
            .with_body(json!({"success": true, "data": {"standard": {"custom": {"quotes": []}}}}).to_string())
            .expect(5)
            .create_async()
            .await;

        let client = client(&server);
        for _ in 0..5 {
            let fragments = client.fetch_page(PageSelector::Random, Duration::ZERO).await.unwrap();
            assert!((1..=10).contains(&fragments.page));
            assert!(fragments.is_empty());
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_page_http_error() {
        let mut server = Server::new_async().await;
        server.mock("POST", ENDPOINT_PATH).with_status(500).create_async().await;

        let err = client(&server).fetch_page(PageSelector::Page(1), Duration::ZERO).await.unwrap_err();
        assert_eq!(*err, ErrorKind::Status(500));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_fetch_page_rejected() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", ENDPOINT_PATH)
            .with_status(200)
            .with_body(json!({"success": false, "error": "navigation failed"}).to_string())
            .create_async()
            .await;

        let err = client(&server).fetch_page(PageSelector::Page(1), Duration::ZERO).await.unwrap_err();
        assert_eq!(*err, ErrorKind::Rejected("navigation failed".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_page_not_json() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", ENDPOINT_PATH)
            .with_status(200)
            .with_body("<html>Bad gateway</html>")
            .create_async()
            .await;

        let err = client(&server).fetch_page(PageSelector::Page(1), Duration::ZERO).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn test_fetch_page_out_of_range_never_sends() {
        let mut server = Server::new_async().await;
        let mock = server.mock("POST", ENDPOINT_PATH).expect(0).create_async().await;

        let err = client(&server).fetch_page(PageSelector::Page(11), Duration::ZERO).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidRequest(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_page_unreachable() {
        let client = FetchClient::new(ClientOptions {
            // Port 9 (discard) on localhost is closed on any sane test machine.
            endpoint: "http://127.0.0.1:9/api".to_string(),
            timeout: Duration::from_secs(2),
            ..ClientOptions::default()
        })
        .unwrap();
        let err = client.fetch_page(PageSelector::Page(1), Duration::ZERO).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Transport(_)));
    }

    #[tokio::test]
    async fn test_probe() {
        let mut server = Server::new_async().await;
        let ok = server.mock("OPTIONS", ENDPOINT_PATH).with_status(204).create_async().await;
        client(&server).probe().await.unwrap();
        ok.assert_async().await;
    }

    #[tokio::test]
    async fn test_probe_failure() {
        let mut server = Server::new_async().await;
        server.mock("OPTIONS", ENDPOINT_PATH).with_status(404).create_async().await;
        let err = client(&server).probe().await.unwrap_err();
        assert_eq!(*err, ErrorKind::Status(404));
    }
}
