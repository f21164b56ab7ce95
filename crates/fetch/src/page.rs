use crate::error::{ErrorKind, Result};
use rand::Rng;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::RangeInclusive;
use std::str::FromStr;

const RANDOM: &str = "random";

/// Which page of the source site to scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSelector {
    /// A specific page number.
    Page(u32),
    /// A page chosen uniformly at random from the valid range on every fetch.
    Random,
}

impl PageSelector {
    /// Turn the selector into a concrete page number within `pages`.
    ///
    /// A random selector draws a fresh page on every call.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidRequest`] if `pages` is empty or a
    /// specific page lies outside of it.
    pub fn resolve<R: Rng + ?Sized>(&self, pages: &RangeInclusive<u32>, rng: &mut R) -> Result<u32> {
        self.check(pages)?;
        match *self {
            Self::Random => Ok(rng.random_range(pages.clone())),
            Self::Page(page) => Ok(page),
        }
    }

    /// Check that the selector can be resolved within `pages`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidRequest`] if `pages` is empty or a
    /// specific page lies outside of it.
    pub fn check(&self, pages: &RangeInclusive<u32>) -> Result<()> {
        if pages.is_empty() {
            exn::bail!(ErrorKind::InvalidRequest(format!(
                "empty page range {}..={}",
                pages.start(),
                pages.end()
            )));
        }
        match *self {
            Self::Page(page) if !pages.contains(&page) => exn::bail!(ErrorKind::InvalidRequest(format!(
                "page {page} is outside of {}..={}",
                pages.start(),
                pages.end()
            ))),
            _ => Ok(()),
        }
    }
}

impl Default for PageSelector {
    fn default() -> Self {
        Self::Page(1)
    }
}

impl From<u32> for PageSelector {
    fn from(page: u32) -> Self {
        Self::Page(page)
    }
}

impl FromStr for PageSelector {
    type Err = crate::error::Error;

    /// Parses `"random"` (any case) or a positive page number.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(RANDOM) {
            return Ok(Self::Random);
        }
        match s.parse::<u32>() {
            Ok(0) | Err(_) => exn::bail!(ErrorKind::InvalidRequest(format!("invalid page selector: {s:?}"))),
            Ok(page) => Ok(Self::Page(page)),
        }
    }
}

impl Display for PageSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Page(page) => write!(f, "{page}"),
            Self::Random => f.write_str(RANDOM),
        }
    }
}
