//! Store backend trait and implementations.
//!
//! This module defines the `StoreBackend` trait, which provides a unified
//! interface for persisting widget state across different backends (local
//! filesystem, memory, read-only decorators).

mod local;
mod memory;
mod ro;

pub use self::local::LocalBackend;
pub use self::memory::MemoryBackend;
pub use self::ro::ReadOnlyBackend;
use crate::error::Result;
use async_trait::async_trait;

/// Unified interface for store backends.
///
/// A string-keyed, string-valued store with last-write-wins semantics. There
/// are no transactions: the widget is single-user and drives one operation at
/// a time.
///
/// # Key Handling
/// All keys must be validated using [`validate_key`](crate::validate_key)
/// before use. Implementations should enforce this validation.
///
/// # Examples
///
/// ```
/// # use quotewall_storage::{backend::StoreBackend, error::Result};
/// async fn bump(backend: &dyn StoreBackend) -> Result<u64> {
///     let current = backend.get("visits").await?.and_then(|v| v.parse::<u64>().ok()).unwrap_or(0);
///     backend.set("visits", &(current + 1).to_string()).await?;
///     Ok(current + 1)
/// }
/// ```
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Name of the backend (used for logging only).
    fn name(&self) -> &str;

    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored under the key.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`.
    ///
    /// Removing a key that holds no value is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Check if a value is stored under `key`.
    ///
    /// Default implementation reads the value and discards it.
    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}
