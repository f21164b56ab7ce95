//! Key/value persistence for widget state.
//!
//! Values are plain text; structured values are JSON-encoded through
//! [`Store`]. Backends are interchangeable behind [`StoreBackend`] so the
//! widget can persist to disk, keep everything in memory, or run read-only.

pub mod backend;
pub mod error;
mod key;
pub mod keys;
mod store;

pub use crate::backend::StoreBackend;
pub use crate::key::validate as validate_key;
pub use crate::store::Store;
use std::sync::Arc;

pub type StoreHandle = Arc<dyn StoreBackend + Send + Sync>;
