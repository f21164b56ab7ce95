#[cfg(feature = "serde")]
use super::tag::RawTag;
use super::{QuoteId, Tag};
use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use std::fmt::{Display, Formatter, Result as FmtResult};
use time::OffsetDateTime;

/// Author name used when a fragment doesn't name one.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

const QUOTE_MARKS: [char; 3] = ['"', '\u{201C}', '\u{201D}'];

/// A single normalized quote.
///
/// Fields are private so the invariants hold for every value in circulation:
/// the text is never empty and never starts or ends with a quote mark, the
/// author is never empty. Changing anything means building a new `Quote`
/// through the `with_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", try_from = "RawQuote")
)]
pub struct Quote {
    id: QuoteId,
    text: String,
    author: String,
    #[cfg_attr(feature = "serde", serde(default))]
    author_link: String,
    #[cfg_attr(feature = "serde", serde(default))]
    tags: Vec<Tag>,
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    timestamp: OffsetDateTime,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    source_page: Option<u32>,
}

impl Quote {
    /// Create a quote from raw body text and author name.
    ///
    /// The text is trimmed and stripped of one surrounding pair of quote
    /// marks; an empty author becomes [`UNKNOWN_AUTHOR`]. A fresh random
    /// [`QuoteId`] and the current instant are stamped on the result.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MissingField`] if no text remains after
    /// normalization.
    pub fn new(text: impl AsRef<str>, author: impl AsRef<str>) -> Result<Self> {
        let text = Some(strip_quote_marks(text.as_ref()))
            .filter(|t| !t.is_empty())
            .ok_or_raise(|| ErrorKind::MissingField("text"))?;
        let author = match author.as_ref().trim() {
            "" => UNKNOWN_AUTHOR,
            name => name,
        };
        Ok(Self {
            id: QuoteId::generate(),
            text: text.to_string(),
            author: author.to_string(),
            author_link: String::new(),
            tags: Vec::new(),
            timestamp: OffsetDateTime::now_utc(),
            source_page: None,
        })
    }

    pub fn with_id(mut self, id: QuoteId) -> Self {
        self.id = id;
        self
    }

    pub fn with_author_link(mut self, link: impl Into<String>) -> Self {
        self.author_link = link.into();
        self
    }

    /// Replace the tags; entries with empty text are dropped.
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags = tags.into_iter().filter(|t| !t.text.trim().is_empty()).collect();
        self
    }

    pub fn with_timestamp(mut self, timestamp: OffsetDateTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_source_page(mut self, page: Option<u32>) -> Self {
        self.source_page = page;
        self
    }

    pub fn id(&self) -> QuoteId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Absolute URL of the author's profile, empty if unknown.
    pub fn author_link(&self) -> &str {
        &self.author_link
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    pub fn source_page(&self) -> Option<u32> {
        self.source_page
    }
}

/// Wire form of a [`Quote`]; decoded values go back through [`Quote::new`]
/// so stored data cannot smuggle in a quote that breaks the invariants.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuote {
    id: QuoteId,
    text: String,
    author: String,
    #[serde(default)]
    author_link: String,
    #[serde(default)]
    tags: Vec<RawTag>,
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
    #[serde(default)]
    source_page: Option<u32>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawQuote> for Quote {
    type Error = ErrorKind;

    fn try_from(raw: RawQuote) -> std::result::Result<Self, Self::Error> {
        let quote = Self::new(&raw.text, &raw.author).map_err(|e| (*e).clone())?;
        Ok(quote
            .with_id(raw.id)
            .with_author_link(raw.author_link)
            .with_tags(raw.tags.into_iter().filter_map(|tag| Tag::new(tag.text, tag.link)))
            .with_timestamp(raw.timestamp)
            .with_source_page(raw.source_page))
    }
}

impl Display for Quote {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "\u{201C}{}\u{201D} \u{2014} {}", self.text, self.author)
    }
}

/// Trims `text` and removes at most one quote mark from each end.
///
/// Straight (`"`) and typographic (`“`, `”`) double quotes are recognised.
/// Interior quote marks are left alone.
///
/// ```rust
/// use quotewall_extract::models::strip_quote_marks;
/// assert_eq!(strip_quote_marks("  \"Hi\"  "), "Hi");
/// assert_eq!(strip_quote_marks("“A “nested” one”"), "A “nested” one");
/// assert_eq!(strip_quote_marks("No quotes"), "No quotes");
/// ```
pub fn strip_quote_marks(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix(QUOTE_MARKS).unwrap_or(text);
    text.strip_suffix(QUOTE_MARKS).unwrap_or(text)
}
