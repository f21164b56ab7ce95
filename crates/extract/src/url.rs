//! Link resolution against the scraped site's base URL.

use crate::consts;

/// Resolves `href` against `base`, producing an absolute URL.
///
/// - Absolute URLs (with a scheme) are returned unchanged.
/// - Protocol-relative URLs (`//host/path`) borrow the base's scheme.
/// - Root-relative paths (`/author/x`) are joined to the base's origin.
/// - Anything else is joined to the base itself.
/// - An empty `href` resolves to an empty string (no link).
///
/// # Examples
///
/// ```rust
/// use quotewall_extract::resolve_url;
/// let base = "https://quotes.toscrape.com";
/// assert_eq!(resolve_url(base, "/author/Jane-Austen"), "https://quotes.toscrape.com/author/Jane-Austen");
/// assert_eq!(resolve_url(base, "https://example.com/x"), "https://example.com/x");
/// assert_eq!(resolve_url(base, "  "), "");
/// ```
pub fn resolve(base: &str, href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }
    if href.starts_with("//") {
        let scheme = consts::SCHEME_REGEX.find(base).map(|m| m.as_str()).unwrap_or("https:");
        return format!("{scheme}{href}");
    }
    if consts::SCHEME_REGEX.is_match(href) {
        return href.to_string();
    }
    let base = base.trim().trim_end_matches('/');
    if href.starts_with('/') {
        let origin = consts::ORIGIN_REGEX.captures(base).and_then(|c| c.get(1)).map(|m| m.as_str()).unwrap_or(base);
        return format!("{origin}{href}");
    }
    if href.starts_with('?') || href.starts_with('#') {
        return format!("{base}{href}");
    }
    format!("{base}/{href}")
}
