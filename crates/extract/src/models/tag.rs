use std::fmt::{Display, Formatter, Result as FmtResult};

/// A tag attached to a quote.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawTag")
)]
pub struct Tag {
    /// Tag text (never empty)
    pub text: String,
    /// Absolute URL of the tag page, or empty if the tag had no link
    pub link: String,
}
impl Tag {
    /// Create a tag, returning `None` if the trimmed text is empty.
    pub fn new(text: impl AsRef<str>, link: impl Into<String>) -> Option<Self> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            link: link.into(),
        })
    }
}
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
pub(crate) struct RawTag {
    pub(crate) text: String,
    #[serde(default)]
    pub(crate) link: String,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTag> for Tag {
    type Error = crate::error::ErrorKind;

    fn try_from(raw: RawTag) -> Result<Self, Self::Error> {
        Self::new(raw.text, raw.link).ok_or(crate::error::ErrorKind::MissingField("tag text"))
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.text)
    }
}
