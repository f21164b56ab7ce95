//! Core of an embeddable random-quote widget.
//!
//! The widget fetches pages of a quote site through a remote scraping
//! endpoint, keeps the parsed quotes in a persisted cache, and shows one
//! random quote at a time while keeping a short history. Everything visual
//! lives behind the [`Presenter`] trait; this crate only decides *what* to
//! show and *when* to tell the user about it.
//!
//! ```no_run
//! use quotewall::{Presenter, Widget};
//! use quotewall::cache::Status;
//! use quotewall::config::Config;
//! use quotewall::extract::models::Quote;
//! use quotewall::rotation::History;
//!
//! struct Stdout;
//! impl Presenter for Stdout {
//!     fn on_quote_ready(&mut self, quote: &Quote) {
//!         println!("{quote}");
//!     }
//!     fn on_status_change(&mut self, status: &Status) {
//!         eprintln!("{status}");
//!     }
//!     fn on_history_changed(&mut self, _history: &History) {}
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let mut widget = Widget::open(&config, Stdout).await?;
//! widget.startup().await;
//! widget.request_new_quote().await;
//! # Ok(())
//! # }
//! ```

pub mod error;
mod presenter;
pub mod share;
mod store;
mod widget;

pub use crate::presenter::Presenter;
pub use crate::store::open_store;
pub use crate::widget::{Options, Widget};

pub use quotewall_cache as cache;
pub use quotewall_config as config;
pub use quotewall_extract as extract;
pub use quotewall_fetch as fetch;
pub use quotewall_rotation as rotation;
pub use quotewall_storage as storage;
