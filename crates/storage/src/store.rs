//! Typed JSON access on top of a [`StoreBackend`].

use crate::StoreHandle;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

/// JSON-encoding wrapper around a [`StoreHandle`].
///
/// Structured values are serialised with `serde_json` before they reach the
/// backend, so anything stored through [`Store::save`] round-trips through
/// [`Store::load`] without loss.
#[derive(Clone)]
pub struct Store {
    backend: StoreHandle,
}
impl Store {
    pub fn new(backend: StoreHandle) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &StoreHandle {
        &self.backend
    }

    /// Load and decode the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing is stored. A value that exists but
    /// cannot be decoded is reported as [`ErrorKind::InvalidData`].
    #[instrument(skip(self), fields(backend = self.backend.name()))]
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.backend.get(key).await? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw).or_raise(|| ErrorKind::InvalidData(key.to_string()))?;
        Ok(Some(value))
    }

    /// Encode and store `value` under `key`.
    #[instrument(skip(self, value), fields(backend = self.backend.name()))]
    pub async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).or_raise(|| ErrorKind::InvalidData(key.to_string()))?;
        self.backend.set(key, &raw).await
    }

    /// Remove the value stored under `key`.
    #[instrument(skip(self), fields(backend = self.backend.name()))]
    pub async fn forget(&self, key: &str) -> Result<()> {
        self.backend.remove(key).await
    }
}
impl From<StoreHandle> for Store {
    fn from(backend: StoreHandle) -> Self {
        Self::new(backend)
    }
}
