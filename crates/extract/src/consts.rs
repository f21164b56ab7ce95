use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

const SCHEME: &str = "[a-zA-Z][a-zA-Z0-9+.-]*:";

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Quote body; the surrounding typographic quote marks are part of the text node.
selector!(TEXT_SELECTOR, ".text");
selector!(AUTHOR_SELECTOR, ".author");
selector!(LINK_SELECTOR, "a[href]");
selector!(TAG_SELECTOR, ".tag");
// Author profile links, either site-relative (`/author/Jane-Austen`) or absolute.
regex!(AUTHOR_PATH_REGEX, format!(r"^(?:{SCHEME})?(?://[^/?#]+)?/author/[^/?#]+").as_str());
regex!(SCHEME_REGEX, format!(r"^{SCHEME}").as_str());
regex!(ORIGIN_REGEX, format!(r"^({SCHEME}//[^/?#]*)").as_str());
