//! Wire format of the remote scraping endpoint.

use crate::error::{ErrorKind, Result};
use serde::{Deserialize, Serialize};

/// CSS selector for one quote block on the source site.
pub const QUOTE_BLOCK_SELECTOR: &str = ".quote";

/// Body of a scrape request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    /// Absolute URL of the page to render.
    pub url: String,
    #[serde(rename = "type")]
    pub kind: RequestKind,
    pub wait_until: String,
    /// Navigation timeout in milliseconds.
    pub timeout: u64,
    /// Extra render wait in milliseconds before extracting.
    pub wait_for_timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
    pub extractors: Extractors,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    #[default]
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extractors {
    pub selectors: Selectors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selectors {
    pub quotes: SelectorSpec,
}

/// A single named extraction directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorSpec {
    pub selector: String,
    pub multiple: bool,
    #[serde(rename = "type")]
    pub kind: SelectorKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    #[default]
    Html,
}

impl Extractors {
    /// Every quote block on the page, as raw HTML.
    pub fn quote_blocks() -> Self {
        Self {
            selectors: Selectors {
                quotes: SelectorSpec {
                    selector: QUOTE_BLOCK_SELECTOR.to_string(),
                    multiple: true,
                    kind: SelectorKind::Html,
                },
            },
        }
    }
}

/// Body of a scrape response.
///
/// Every level below `success` is optional so a missing path surfaces as
/// [`ErrorKind::MalformedPayload`] rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<ResponseData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseData {
    #[serde(default)]
    pub standard: Option<StandardData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandardData {
    #[serde(default)]
    pub custom: Option<CustomData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomData {
    #[serde(default)]
    pub quotes: Option<Vec<String>>,
}

impl ScrapeResponse {
    /// Unwrap the quote fragments, in page order.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Rejected`] if the endpoint reported failure,
    /// [`ErrorKind::MalformedPayload`] if `data.standard.custom.quotes` is
    /// missing.
    pub fn into_fragments(self) -> Result<Vec<String>> {
        if !self.success {
            let reason = self.error.or(self.message).unwrap_or_else(|| "success flag not set".to_string());
            exn::bail!(ErrorKind::Rejected(reason));
        }
        self.data
            .and_then(|data| data.standard)
            .and_then(|standard| standard.custom)
            .and_then(|custom| custom.quotes)
            .ok_or_else(|| exn::Exn::from(ErrorKind::MalformedPayload("missing data.standard.custom.quotes".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let request = ScrapeRequest {
            url: "https://quotes.toscrape.com/page/2/".to_string(),
            kind: RequestKind::Data,
            wait_until: "networkidle2".to_string(),
            timeout: 30_000,
            wait_for_timeout: 1_000,
            viewport: Some(Viewport { width: 1920, height: 1080 }),
            extractors: Extractors::quote_blocks(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "url": "https://quotes.toscrape.com/page/2/",
                "type": "data",
                "waitUntil": "networkidle2",
                "timeout": 30000,
                "waitForTimeout": 1000,
                "viewport": {"width": 1920, "height": 1080},
                "extractors": {"selectors": {"quotes": {"selector": ".quote", "multiple": true, "type": "html"}}},
            })
        );
    }

    #[test]
    fn test_request_without_viewport() {
        let request = ScrapeRequest {
            url: "https://quotes.toscrape.com/page/1/".to_string(),
            kind: RequestKind::Data,
            wait_until: "load".to_string(),
            timeout: 5_000,
            wait_for_timeout: 0,
            viewport: None,
            extractors: Extractors::quote_blocks(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("viewport").is_none());
    }

    #[test]
    fn test_response_fragments() {
        let response: ScrapeResponse = serde_json::from_value(json!({
            "success": true,
            "data": {"standard": {"custom": {"quotes": ["<div>a</div>", "<div>b</div>"]}}},
        }))
        .unwrap();
        assert_eq!(response.into_fragments().unwrap(), vec!["<div>a</div>", "<div>b</div>"]);
    }

    #[test]
    fn test_response_rejected() {
        let response: ScrapeResponse =
            serde_json::from_value(json!({"success": false, "error": "navigation timeout"})).unwrap();
        let err = response.into_fragments().unwrap_err();
        assert_eq!(*err, ErrorKind::Rejected("navigation timeout".to_string()));
    }

    #[test]
    fn test_response_missing_success_flag() {
        let response: ScrapeResponse = serde_json::from_value(json!({"data": {}})).unwrap();
        assert!(matches!(&*response.into_fragments().unwrap_err(), ErrorKind::Rejected(_)));
    }

    #[test]
    fn test_response_missing_path() {
        for body in [
            json!({"success": true}),
            json!({"success": true, "data": {}}),
            json!({"success": true, "data": {"standard": {"custom": {}}}}),
        ] {
            let response: ScrapeResponse = serde_json::from_value(body).unwrap();
            assert!(matches!(&*response.into_fragments().unwrap_err(), ErrorKind::MalformedPayload(_)));
        }
    }
}
