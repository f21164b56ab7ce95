//! Read-only store backend.
//!
//! This module provides a store backend implementation that wraps other
//! implementations and prevents write operations from executing, but
//! indicating success on return.

use async_trait::async_trait;

use crate::{StoreBackend, StoreHandle, error::Result};

/// Read-only store backend.
///
/// Wraps another backend and silently drops all write operations, logging an
/// [`info event`](tracing::Event). Persisted state can still be read, so a
/// widget started on a read-only store shows the last cached quotes but never
/// records anything new.
#[derive(Clone)]
pub struct ReadOnlyBackend {
    inner: StoreHandle,
}
impl ReadOnlyBackend {
    pub fn new(inner: StoreHandle) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StoreBackend for ReadOnlyBackend {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        tracing::info!(key, bytes = value.len(), "Skipping write during read-only mode");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        tracing::info!(key, "Skipping remove during read-only mode");
        Ok(())
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        self.inner.contains(key).await
    }
}
