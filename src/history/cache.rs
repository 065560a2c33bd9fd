use time::PrimitiveDateTime;

use crate::history::types::{HistoryEntry, SortOrder, parse_server_timestamp};

/// Client-side mirror of the server history list. Pure by construction: the
/// only mutations it accepts are a wholesale replace and already-confirmed
/// delete/clear commits; optimistic state never enters the cache.
#[derive(Debug, Default, Clone)]
pub struct HistoryCache {
    entries: Vec<HistoryEntry>,
}

impl HistoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Full replace with the server's current list. No merge logic exists or
    /// is required; mutations are only ever applied post-confirmation.
    pub fn replace_all(&mut self, entries: Vec<HistoryEntry>) {
        self.entries = entries;
    }

    /// Pure projection ordered by parsed timestamp. The sort is stable, so
    /// entries with equal (or unparseable) timestamps keep their original
    /// server order under both directions.
    pub fn sorted(&self, order: SortOrder) -> Vec<HistoryEntry> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| {
            let (ka, kb) = (sort_key(a), sort_key(b));
            match order {
                SortOrder::NewestFirst => kb.cmp(&ka),
                SortOrder::OldestFirst => ka.cmp(&kb),
            }
        });
        entries
    }

    /// Case-insensitive substring match over skill, duration, and timestamp
    /// text. An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<HistoryEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.entries.clone();
        }
        self.entries
            .iter()
            .filter(|entry| {
                entry.skill.to_lowercase().contains(&needle)
                    || entry.duration.to_lowercase().contains(&needle)
                    || entry.timestamp_raw.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Applies a server-confirmed deletion. Removes exactly the matching
    /// entry; returns whether one was present.
    pub fn confirm_delete(&mut self, id: &str) -> bool {
        match self.entries.iter().position(|entry| entry.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Applies a server-confirmed clear-all.
    pub fn confirm_clear(&mut self) {
        self.entries.clear();
    }
}

fn sort_key(entry: &HistoryEntry) -> Option<PrimitiveDateTime> {
    parse_server_timestamp(&entry.timestamp_raw)
}
