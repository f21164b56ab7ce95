use quotewall_config::Config;
use quotewall_storage::backend::{LocalBackend, MemoryBackend, ReadOnlyBackend};
use quotewall_storage::{Store, StoreHandle};
use std::sync::Arc;
use tracing::instrument;

/// Open the store described by `config`.
///
/// Persistence is never required to run: if the storage directory cannot be
/// used, state is kept in memory for the session and a warning is logged.
#[instrument(skip(config), fields(read_only = config.storage.read_only))]
pub fn open_store(config: &Config) -> Store {
    let backend: StoreHandle = match config.storage_directory() {
        Some(directory) => match LocalBackend::new("local", &directory) {
            Ok(local) => Arc::new(local),
            Err(e) => {
                tracing::warn!(directory = %directory.display(), error = %e, "Falling back to in-memory storage");
                Arc::new(MemoryBackend::default())
            },
        },
        None => {
            tracing::warn!("No data directory available, falling back to in-memory storage");
            Arc::new(MemoryBackend::default())
        },
    };
    if config.storage.read_only {
        Store::new(Arc::new(ReadOnlyBackend::new(backend)))
    } else {
        Store::new(backend)
    }
}
