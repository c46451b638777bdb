use movie_shelf_models::{WatchedEntry, WatchedStats};
use serde::{Deserialize, Serialize};

/// Ordered collection of rated movies. Insertion order is display order;
/// ids are unique within the list. Serializes as a plain array so the
/// persisted representation round-trips to an equal sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WatchedList {
    entries: Vec<WatchedEntry>,
}

impl WatchedList {
    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.entries.iter().any(|e| e.imdb_id == imdb_id)
    }

    pub fn find(&self, imdb_id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|e| e.imdb_id == imdb_id)
    }

    /// Appends unless the id is already present.
    pub fn add(&mut self, entry: WatchedEntry) -> bool {
        if self.contains(&entry.imdb_id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Removes the entry with the given id. Removing an absent id leaves
    /// the list unchanged.
    pub fn remove(&mut self, imdb_id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.imdb_id != imdb_id);
        self.entries.len() != before
    }

    pub fn stats(&self) -> WatchedStats {
        WatchedStats::from_entries(&self.entries)
    }
}
