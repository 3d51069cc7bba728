//! Fan-out/fan-in over a fixed pool of resolver workers.
//!
//! Items are queued up front; `workers` tasks pop from the shared queue and
//! resolve one item at a time. Deduplication happens in a single critical
//! section, so the first record *accepted* for a canonical ID wins. Which
//! worker gets there first depends on scheduling and is not stable across
//! runs; `OutputOrder::Input` re-sorts survivors by input position afterwards.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use animecat_common::{OutputOrder, RawItem, ResolvedRecord};

use crate::resolver::Resolver;

#[derive(Debug, Clone, Copy)]
pub struct OrchestratorOptions {
    /// Concurrency bound. Zero is treated as one.
    pub workers: usize,
    pub order: OutputOrder,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            workers: 8,
            order: OutputOrder::Input,
        }
    }
}

/// Counters for one `resolve_all` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub total: usize,
    /// Items skipped before resolution (blank primary title).
    pub malformed: usize,
    /// Items for which every query variant missed.
    pub unresolved: usize,
    /// Records dropped because their canonical ID was already accepted.
    pub duplicates: usize,
    pub resolved: usize,
    pub remote_calls: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
}

#[derive(Debug, Clone)]
pub struct CatalogRun {
    pub records: Vec<ResolvedRecord>,
    pub report: RunReport,
}

#[derive(Default)]
struct DedupMap {
    seen: HashSet<String>,
    accepted: Vec<(usize, ResolvedRecord)>,
}

impl DedupMap {
    /// Insert-if-absent. Returns false when the canonical ID is already taken.
    fn accept(&mut self, index: usize, record: ResolvedRecord) -> bool {
        if !self.seen.insert(record.canonical_id.clone()) {
            return false;
        }
        self.accepted.push((index, record));
        true
    }
}

#[derive(Default)]
struct Tally {
    unresolved: AtomicUsize,
    duplicates: AtomicUsize,
}

pub struct Orchestrator {
    resolver: Arc<Resolver>,
    options: OrchestratorOptions,
}

impl Orchestrator {
    pub fn new(resolver: Arc<Resolver>, options: OrchestratorOptions) -> Self {
        Self { resolver, options }
    }

    pub fn resolver(&self) -> &Arc<Resolver> {
        &self.resolver
    }

    /// Resolve and deduplicate a batch. Never fails; the result may be empty.
    pub async fn resolve_all(&self, items: Vec<RawItem>) -> Vec<ResolvedRecord> {
        self.resolve_all_with_report(items).await.records
    }

    pub async fn resolve_all_with_report(&self, items: Vec<RawItem>) -> CatalogRun {
        let total = items.len();
        let calls_before = self.resolver.remote_calls();
        let hits_before = self.resolver.cache().hits();
        let misses_before = self.resolver.cache().misses();

        let mut malformed = 0;
        let mut queue = VecDeque::with_capacity(total);
        for (index, item) in items.into_iter().enumerate() {
            if item.is_well_formed() {
                queue.push_back((index, item));
            } else {
                malformed += 1;
                warn!(index, "Skipping item with blank title");
            }
        }

        let worker_count = self.options.workers.max(1).min(queue.len().max(1));
        let queue = Arc::new(Mutex::new(queue));
        let dedup = Arc::new(Mutex::new(DedupMap::default()));
        let tally = Arc::new(Tally::default());

        info!(total, workers = worker_count, "Resolving batch");

        let mut workers = JoinSet::new();
        for worker in 0..worker_count {
            let resolver = self.resolver.clone();
            let queue = queue.clone();
            let dedup = dedup.clone();
            let tally = tally.clone();

            workers.spawn(async move {
                loop {
                    let next = queue.lock().await.pop_front();
                    let Some((index, item)) = next else { break };

                    let Some(record) = resolver.resolve(&item).await else {
                        tally.unresolved.fetch_add(1, Ordering::Relaxed);
                        continue;
                    };

                    let canonical_id = record.canonical_id.clone();
                    if !dedup.lock().await.accept(index, record) {
                        tally.duplicates.fetch_add(1, Ordering::Relaxed);
                        debug!(
                            worker,
                            index,
                            canonical_id = canonical_id.as_str(),
                            "Duplicate canonical ID dropped"
                        );
                    }
                }
            });
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Resolver worker aborted");
            }
        }

        let mut accepted = std::mem::take(&mut dedup.lock().await.accepted);
        if self.options.order == OutputOrder::Input {
            accepted.sort_by_key(|(index, _)| *index);
        }
        let records: Vec<ResolvedRecord> = accepted.into_iter().map(|(_, r)| r).collect();

        let report = RunReport {
            total,
            malformed,
            unresolved: tally.unresolved.load(Ordering::Relaxed),
            duplicates: tally.duplicates.load(Ordering::Relaxed),
            resolved: records.len(),
            remote_calls: self.resolver.remote_calls() - calls_before,
            cache_hits: self.resolver.cache().hits() - hits_before,
            cache_misses: self.resolver.cache().misses() - misses_before,
        };

        info!(
            total = report.total,
            resolved = report.resolved,
            unresolved = report.unresolved,
            duplicates = report.duplicates,
            malformed = report.malformed,
            remote_calls = report.remote_calls,
            cache_hits = report.cache_hits,
            "Resolution batch complete"
        );

        CatalogRun { records, report }
    }
}
