// Test doubles for the resolution pipeline.
//
// MockSearch (MetadataSearch) — HashMap-based query → match, records every
// query it receives so tests can assert on call order and count.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;

use animecat_common::{MatchResult, RawItem};

use crate::traits::MetadataSearch;

/// Builder pattern: `.on_query()`, `.failing()`, `.with_delay()`.
/// Unregistered queries return `NotFound`.
pub struct MockSearch {
    matches: HashMap<String, MatchResult>,
    failing: HashSet<String>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl MockSearch {
    pub fn new() -> Self {
        Self {
            matches: HashMap::new(),
            failing: HashSet::new(),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on_query(mut self, query: &str, canonical_id: &str, image_url: Option<&str>) -> Self {
        self.matches.insert(
            query.to_string(),
            MatchResult::found(canonical_id, image_url.map(String::from)),
        );
        self
    }

    /// Make `query` fail like a transport error.
    pub fn failing(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    /// Sleep before answering, to widen race windows or trip timeouts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every query received, in arrival order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataSearch for MockSearch {
    async fn search(&self, query: &str) -> Result<MatchResult> {
        self.calls.lock().unwrap().push(query.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(query) {
            bail!("connection reset while searching '{query}'");
        }
        Ok(self
            .matches
            .get(query)
            .cloned()
            .unwrap_or(MatchResult::NotFound))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn item(title: &str, episode: &str) -> RawItem {
    RawItem::new(title).with_episode(episode)
}
