use quotewall_extract::models::Quote;
use serde::{Deserialize, Serialize};

const PREVIEW_CHARS: usize = 100;

/// A quote as it was shown, together with its display number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub quote: Quote,
    /// Value of the rotation counter when the quote was shown.
    pub display_number: u64,
}

impl HistoryEntry {
    pub fn new(quote: Quote, display_number: u64) -> Self {
        Self { quote, display_number }
    }

    /// Quote text cut down to a list-friendly length.
    pub fn preview(&self) -> String {
        let text = self.quote.text();
        match text.char_indices().nth(PREVIEW_CHARS) {
            Some((cut, _)) => format!("{}...", &text[..cut]),
            None => text.to_string(),
        }
    }

    /// `— Author (#12)`
    pub fn caption(&self) -> String {
        format!("\u{2014} {} (#{})", self.quote.author(), self.display_number)
    }
}

/// Shown quotes, most recent first, bounded to a fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
    capacity: usize,
    dedup: bool,
}

impl History {
    /// An empty history holding at most `capacity` entries. With `dedup`, a
    /// repeated quote moves to the front instead of appearing twice.
    pub fn new(capacity: usize, dedup: bool) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            dedup,
        }
    }

    /// Rebuild a history from persisted entries (most recent first).
    ///
    /// Entries past `capacity` are dropped, so shrinking the configured
    /// capacity takes effect on the next load.
    pub fn from_entries(entries: Vec<HistoryEntry>, capacity: usize, dedup: bool) -> Self {
        let mut history = Self { entries, capacity, dedup };
        history.entries.truncate(capacity);
        history
    }

    /// Put `entry` at the front, evicting the oldest entry past capacity.
    pub fn record(&mut self, entry: HistoryEntry) {
        if self.dedup {
            let id = entry.quote.id();
            self.entries.retain(|e| e.quote.id() != id);
        }
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
