//! Scripted fragment source for testing.

use crate::error::{ErrorKind, Result};
use crate::page::PageSelector;
use crate::source::{FragmentSource, Fragments};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A [`FragmentSource`] that replays queued responses in order.
///
/// Every call to [`fetch_page`](FragmentSource::fetch_page) pops the next
/// queued response; an exhausted queue answers with a transport error, so a
/// test that expects "no network call" can assert on [`MockSource::calls`]
/// instead of wiring up a server.
pub struct MockSource {
    source_url: String,
    responses: Mutex<VecDeque<std::result::Result<Fragments, ErrorKind>>>,
    requests: Mutex<Vec<(PageSelector, Duration)>>,
    calls: AtomicUsize,
    probe: std::result::Result<(), ErrorKind>,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            source_url: crate::client::DEFAULT_SOURCE_URL.to_string(),
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            probe: Ok(()),
        }
    }

    /// Queue a successful response.
    pub fn then_fragments(self, page: u32, fragments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.push(Ok(Fragments {
            page,
            fragments: fragments.into_iter().map(Into::into).collect(),
        }))
    }

    /// Queue a failed response.
    pub fn then_fail(self, kind: ErrorKind) -> Self {
        self.push(Err(kind))
    }

    /// Make [`probe`](FragmentSource::probe) fail with `kind`.
    pub fn with_probe_failure(mut self, kind: ErrorKind) -> Self {
        self.probe = Err(kind);
        self
    }

    /// Number of times `fetch_page` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every `(selector, wait)` pair `fetch_page` was called with, in order.
    pub fn requests(&self) -> Vec<(PageSelector, Duration)> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn push(self, response: std::result::Result<Fragments, ErrorKind>) -> Self {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
        self
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FragmentSource for MockSource {
    fn source_url(&self) -> &str {
        &self.source_url
    }

    async fn fetch_page(&self, page: PageSelector, wait: Duration) -> Result<Fragments> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((page, wait));
        }
        let next = self.responses.lock().ok().and_then(|mut responses| responses.pop_front());
        match next {
            Some(Ok(fragments)) => Ok(fragments),
            Some(Err(kind)) => Err(kind.into()),
            None => exn::bail!(ErrorKind::Transport("no response queued".to_string())),
        }
    }

    async fn probe(&self) -> Result<()> {
        self.probe.clone().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order() {
        let source = MockSource::new()
            .then_fragments(1, ["a"])
            .then_fail(ErrorKind::Status(500))
            .then_fragments(3, ["b", "c"]);

        assert_eq!(source.fetch_page(PageSelector::Page(1), Duration::ZERO).await.unwrap().fragments, vec!["a"]);
        let err = source.fetch_page(PageSelector::Random, Duration::ZERO).await.unwrap_err();
        assert_eq!(*err, ErrorKind::Status(500));
        assert_eq!(source.fetch_page(PageSelector::Page(3), Duration::ZERO).await.unwrap().len(), 2);
        let err = source.fetch_page(PageSelector::Page(3), Duration::ZERO).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Transport(_)));
        assert_eq!(source.calls(), 4);
        assert_eq!(source.requests()[1], (PageSelector::Random, Duration::ZERO));
    }

    #[tokio::test]
    async fn test_probe() {
        MockSource::new().probe().await.unwrap();
        let err = MockSource::new()
            .with_probe_failure(ErrorKind::Status(503))
            .probe()
            .await
            .unwrap_err();
        assert_eq!(*err, ErrorKind::Status(503));
    }
}
