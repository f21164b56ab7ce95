use crate::error::{ErrorKind, Result};
use crate::history::{History, HistoryEntry};
use exn::OptionExt;
use quotewall_extract::models::Quote;
use quotewall_storage::{Store, keys};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{Span, instrument};

/// Picks quotes to show and keeps the display counter and history.
///
/// Counter and history are persisted after every change; persistence
/// failures are logged and the in-memory values stay authoritative.
pub struct RotationEngine<R = StdRng> {
    store: Store,
    rng: R,
    counter: u64,
    history: History,
}

impl RotationEngine<StdRng> {
    /// Restore counter and history from `store`, seeding selection from the
    /// operating system.
    pub async fn load(store: Store, capacity: usize, dedup: bool) -> Self {
        Self::load_with_rng(store, capacity, dedup, StdRng::from_os_rng()).await
    }
}

impl<R: Rng> RotationEngine<R> {
    #[instrument(skip(store, rng), fields(counter, history))]
    pub async fn load_with_rng(store: Store, capacity: usize, dedup: bool, rng: R) -> Self {
        let counter = restore::<u64>(&store, keys::ROTATION_COUNTER).await.unwrap_or_default();
        let entries = restore::<Vec<HistoryEntry>>(&store, keys::HISTORY).await.unwrap_or_default();
        let history = History::from_entries(entries, capacity, dedup);
        let span = Span::current();
        span.record("counter", counter);
        span.record("history", history.len());
        Self {
            store,
            rng,
            counter,
            history,
        }
    }

    /// Number of quotes shown so far.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Pick a quote uniformly at random from `quotes` and record it.
    ///
    /// Consecutive picks may return the same quote. The counter is bumped
    /// and persisted first, then the history entry carrying the new counter
    /// value is recorded and the history persisted.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::EmptySet`] if `quotes` is empty.
    #[instrument(skip(self, quotes), fields(quotes = quotes.len(), display_number))]
    pub async fn pick_next(&mut self, quotes: &[Quote]) -> Result<Quote> {
        if quotes.is_empty() {
            exn::bail!(ErrorKind::EmptySet);
        }
        let quote = quotes[self.rng.random_range(0..quotes.len())].clone();
        self.counter += 1;
        Span::current().record("display_number", self.counter);
        self.persist(keys::ROTATION_COUNTER, &self.counter).await;
        self.history.record(HistoryEntry::new(quote.clone(), self.counter));
        self.persist(keys::HISTORY, self.history.entries()).await;
        Ok(quote)
    }

    /// The quote at `index` in the history (0 is the most recent).
    ///
    /// Looking at history changes neither the counter nor the history.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::IndexOutOfRange`] if there is no entry at `index`.
    pub fn load_from_history(&self, index: usize) -> Result<Quote> {
        let len = self.history.len();
        self.history
            .get(index)
            .map(|entry| entry.quote.clone())
            .ok_or_raise(|| ErrorKind::IndexOutOfRange { index, len })
    }

    /// Reset counter and history, in memory and in the store.
    #[instrument(skip(self))]
    pub async fn reset(&mut self) {
        self.counter = 0;
        self.history.clear();
        for key in [keys::ROTATION_COUNTER, keys::HISTORY] {
            if let Err(e) = self.store.forget(key).await {
                tracing::warn!(key, error = %e, "Failed to remove persisted rotation state");
            }
        }
    }

    async fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.store.save(key, value).await {
            tracing::warn!(key, error = %e, "Failed to persist rotation state");
        }
    }
}

async fn restore<T: DeserializeOwned>(store: &Store, key: &str) -> Option<T> {
    match store.load(key).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring unreadable rotation state");
            None
        },
    }
}
