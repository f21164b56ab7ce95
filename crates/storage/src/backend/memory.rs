//! In-memory store backend.

use crate::StoreBackend;
use crate::error::Result;
use crate::key::validate as validate_key;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory store backend.
///
/// Values are stored in a `HashMap` behind a [`RwLock`], so all trait methods
/// can operate on `&self` without external synchronisation. Used when no
/// persistent storage is available (state only lives for the session) and in
/// unit tests that need a [`StoreBackend`] without filesystem dependencies.
///
/// # Examples
///
/// ```
/// use quotewall_storage::backend::{MemoryBackend, StoreBackend};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = MemoryBackend::with_values([("quotewall.counter", "3")]);
/// assert_eq!(backend.get("quotewall.counter").await?.as_deref(), Some("3"));
///
/// backend.set("quotewall.counter", "4").await?;
/// assert_eq!(backend.get("quotewall.counter").await?.as_deref(), Some("4"));
/// # Ok(())
/// # }
/// ```
pub struct MemoryBackend {
    name: String,
    values: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create a memory backend pre-populated with values.
    ///
    /// Panics if any key fails validation. If test setup is wrong, then test
    /// should not pass.
    pub fn with_values(values: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        let mut map = HashMap::new();
        for (key, value) in values {
            let key = key.into();
            if validate_key(&key).is_err() {
                panic!("MemoryBackend::with_values: invalid key {key:?}");
            }
            map.insert(key, value.into());
        }
        Self {
            name: "memory".to_string(),
            values: RwLock::new(map),
        }
    }

    /// Number of keys currently holding a value.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}
impl Default for MemoryBackend {
    fn default() -> Self {
        let values: [(&str, &str); 0] = [];
        Self::with_values(values)
    }
}

#[async_trait]
impl StoreBackend for MemoryBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = validate_key(key)?;
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let key = validate_key(key)?;
        self.values.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = validate_key(key)?;
        self.values.write().await.remove(key);
        Ok(())
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        let key = validate_key(key)?;
        Ok(self.values.read().await.contains_key(key))
    }
}
