mod consts;
pub mod error;
mod extract;
pub mod models;
mod url;

pub use crate::extract::Extractor;
pub use crate::url::resolve as resolve_url;

use crate::error::Result;
use crate::models::Quote;
use tracing::instrument;

/// Easy, top-level entrypoint for extracting a single [`Quote`] from one
/// quote-block HTML fragment.
///
/// Relative links are resolved against `base_url`. See [`Extractor`] for
/// batch extraction and page stamping.
///
/// # Examples
///
/// ```rust
/// let fragment = r#"<div class="quote"><span class="text">"Hi"</span><small class="author">A</small></div>"#;
/// let quote = quotewall_extract::extract(fragment, "https://quotes.toscrape.com").unwrap();
/// assert_eq!(quote.text(), "Hi");
/// assert_eq!(quote.author(), "A");
/// ```
#[instrument(skip(fragment), fields(fragment_size = fragment.len()))]
pub fn extract(fragment: &str, base_url: &str) -> Result<Quote> {
    Extractor::new(base_url).quote(fragment)
}
