//! Text for sharing a quote outside the widget.

use quotewall_extract::models::Quote;

pub const APP_NAME: &str = "DevNova-ID Random Quotes Generator";
const TWEET_INTENT_URL: &str = "https://twitter.com/intent/tweet";
const HASHTAGS: &str = "Quotes,Inspiration,DevNova";

/// Plain text for the clipboard.
pub fn clipboard_text(quote: &Quote) -> String {
    format!("\"{}\"\n\n\u{2014} {}\n\nGenerated by {APP_NAME}", quote.text(), quote.author())
}

/// A tweet composer URL prefilled with the quote.
pub fn tweet_intent_url(quote: &Quote) -> String {
    let text = format!("\"{}\" \u{2014} {}", quote.text(), quote.author());
    format!("{TWEET_INTENT_URL}?text={}&hashtags={HASHTAGS}", urlencoding::encode(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_clipboard_text() {
        let quote = Quote::new("“Be yourself.”", "Oscar Wilde").unwrap();
        assert_eq!(
            clipboard_text(&quote),
            "\"Be yourself.\"\n\n\u{2014} Oscar Wilde\n\nGenerated by DevNova-ID Random Quotes Generator"
        );
    }

    #[rstest]
    #[case("Hi & bye", "A", "%22Hi%20%26%20bye%22%20%E2%80%94%20A")]
    #[case("Why?", "J.K. Rowling", "%22Why%3F%22%20%E2%80%94%20J.K.%20Rowling")]
    fn test_tweet_intent_url(#[case] text: &str, #[case] author: &str, #[case] encoded: &str) {
        let quote = Quote::new(text, author).unwrap();
        assert_eq!(
            tweet_intent_url(&quote),
            format!("https://twitter.com/intent/tweet?text={encoded}&hashtags=Quotes,Inspiration,DevNova")
        );
    }
}
