//! Client for the remote scraping endpoint.
//!
//! The endpoint renders a page of the quote source in a headless browser and
//! returns the raw HTML of every quote block on it. This crate only moves
//! fragments; turning them into quotes is `quotewall-extract`'s job.

mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod page;
pub mod payload;
mod source;

pub use crate::client::{ClientOptions, DEFAULT_ENDPOINT, DEFAULT_SOURCE_URL, FetchClient};
#[cfg(any(test, feature = "mock"))]
pub use crate::mock::MockSource;
pub use crate::page::PageSelector;
pub use crate::source::{FragmentSource, Fragments};
