use crate::set::QuoteSet;
use quotewall_extract::models::{Quote, QuoteId, Tag};
use time::OffsetDateTime;

const SOURCE_URL: &str = "https://quotes.toscrape.com";

struct Entry {
    id: u64,
    text: &'static str,
    author: &'static str,
    author_slug: &'static str,
    tags: &'static [&'static str],
}

const ENTRIES: [Entry; 3] = [
    Entry {
        id: 1,
        text: "The world as we have created it is a process of our thinking. It cannot be changed without changing our thinking.",
        author: "Albert Einstein",
        author_slug: "Albert-Einstein",
        tags: &["change", "thinking", "world"],
    },
    Entry {
        id: 2,
        text: "It is our choices, Harry, that show what we truly are, far more than our abilities.",
        author: "J.K. Rowling",
        author_slug: "J-K-Rowling",
        tags: &["abilities", "choices"],
    },
    Entry {
        id: 3,
        text: "There are only two ways to live your life. One is as though nothing is a miracle. The other is as though everything is a miracle.",
        author: "Albert Einstein",
        author_slug: "Albert-Einstein",
        tags: &["inspirational", "life", "live"],
    },
];

/// The built-in quotes served when nothing else is available.
///
/// Every call returns an identical set: ids and timestamps are fixed.
pub fn fallback_quotes() -> QuoteSet {
    ENTRIES
        .iter()
        .filter_map(|entry| {
            let quote = Quote::new(entry.text, entry.author).ok()?;
            let tags = entry.tags.iter().filter_map(|tag| Tag::new(tag, format!("{SOURCE_URL}/tag/{tag}/")));
            Some(
                quote
                    .with_id(QuoteId::from_raw(entry.id))
                    .with_author_link(format!("{SOURCE_URL}/author/{}", entry.author_slug))
                    .with_tags(tags)
                    .with_source_page(Some(1))
                    .with_timestamp(OffsetDateTime::UNIX_EPOCH),
            )
        })
        .collect()
}
