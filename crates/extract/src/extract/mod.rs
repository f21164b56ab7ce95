//! Quote extraction from scraped HTML fragments.

use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::models::{Quote, Tag};
use crate::url::resolve as resolve_url;
use scraper::{ElementRef, Html};
use tracing::instrument;

/// Turns quote-block HTML fragments into [`Quote`]s.
///
/// An extractor is bound to the base URL of the scraped site (so relative
/// author and tag links can be made absolute) and, optionally, to the page
/// number the fragments were scraped from.
#[derive(Debug, Clone)]
pub struct Extractor {
    base_url: String,
    page: Option<u32>,
}
impl Extractor {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            page: None,
        }
    }

    /// Stamp every extracted quote with the page it was scraped from.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page(&self) -> Option<u32> {
        self.page
    }

    /// Extracts a single quote from one fragment.
    ///
    /// # Errors
    ///
    /// Returns an error if the fragment is empty or has no (non-empty)
    /// `.text` element. Missing authors, author links and tags are not
    /// errors.
    #[instrument(level = "trace", skip(self, fragment), fields(fragment_size = fragment.len()))]
    pub fn quote(&self, fragment: &str) -> Result<Quote> {
        if fragment.trim().is_empty() {
            exn::bail!(ErrorKind::EmptyFragment);
        }
        let document = Html::parse_fragment(fragment);
        let text = Self::text(&document).unwrap_or_default();
        let author = Self::author(&document).unwrap_or_default();
        Ok(Quote::new(text, author)?
            .with_author_link(self.author_link(&document))
            .with_tags(self.tags(&document))
            .with_source_page(self.page))
    }

    /// Extracts every parseable quote from a batch of fragments.
    ///
    /// Fragments that fail to parse are logged and skipped; they never abort
    /// the rest of the batch. Order is preserved.
    #[instrument(skip(self, fragments), fields(page = self.page, total, extracted))]
    pub fn quotes<I>(&self, fragments: I) -> Vec<Quote>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut total = 0usize;
        let mut quotes = Vec::new();
        for (index, fragment) in fragments.into_iter().enumerate() {
            total += 1;
            match self.quote(fragment.as_ref()) {
                Ok(quote) => quotes.push(quote),
                Err(e) => tracing::warn!(index, error = %e, "Skipping unparseable quote fragment"),
            }
        }
        let span = tracing::Span::current();
        span.record("total", total);
        span.record("extracted", quotes.len());
        quotes
    }

    fn text(document: &Html) -> Option<String> {
        document.select(&consts::TEXT_SELECTOR).next().map(Self::element_text)
    }

    fn author(document: &Html) -> Option<String> {
        document.select(&consts::AUTHOR_SELECTOR).next().map(Self::element_text)
    }

    /// First link pointing at an author profile, resolved to an absolute URL.
    fn author_link(&self, document: &Html) -> String {
        document
            .select(&consts::LINK_SELECTOR)
            .filter_map(|el| el.value().attr("href"))
            .map(str::trim)
            .find(|href| consts::AUTHOR_PATH_REGEX.is_match(href))
            .map(|href| resolve_url(&self.base_url, href))
            .unwrap_or_default()
    }

    fn tags(&self, document: &Html) -> Vec<Tag> {
        document
            .select(&consts::TAG_SELECTOR)
            .filter_map(|el| {
                let link = el.value().attr("href").map(|href| resolve_url(&self.base_url, href)).unwrap_or_default();
                Tag::new(Self::element_text(el), link)
            })
            .collect()
    }

    fn element_text(element: ElementRef<'_>) -> String {
        element.text().collect::<String>().trim().to_string()
    }
}
