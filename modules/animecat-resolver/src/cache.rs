use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use animecat_common::MatchResult;
use tokio::sync::RwLock;

/// Per-run memo of remote lookups keyed by the exact query string.
///
/// Negative results are stored too, so a variant that missed for one item is
/// not re-queried when another item produces the same string. Entries are
/// write-once: the first `put` for a key wins and later ones are ignored.
pub struct QueryCache {
    entries: RwLock<HashMap<String, MatchResult>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    pub async fn get(&self, query: &str) -> Option<MatchResult> {
        let entries = self.entries.read().await;
        match entries.get(query) {
            Some(result) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(result.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store `result` unless the key already holds a value. Returns whether
    /// this call wrote the entry.
    pub async fn put(&self, query: &str, result: MatchResult) -> bool {
        let mut entries = self.entries.write().await;
        if entries.contains_key(query) {
            return false;
        }
        entries.insert(query.to_string(), result);
        true
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}
