use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use animecat_common::{
    episode_description, MatchResult, PosterShape, RawItem, ResolvedRecord, TypeTag,
};

use crate::cache::QueryCache;
use crate::normalize::{normalize_numerals, strip_language_tags};
use crate::traits::MetadataSearch;

/// Search strings to try for `item`, in order, without repeats.
///
/// The alternate (original-script) title is preferred when present:
/// 1. numeral-normalized preferred title
/// 2. preferred title as written, if different
/// 3. numeral-normalized counterpart title, only when both titles exist
pub fn query_variants(item: &RawItem) -> Vec<String> {
    let primary_title = strip_language_tags(&item.primary_title);
    let alternate = item.alternate().map(strip_language_tags);

    let (preferred, counterpart) = match alternate {
        Some(alt) => (alt, Some(primary_title)),
        None => (primary_title, None),
    };

    let mut variants: Vec<String> = Vec::with_capacity(3);
    let mut push = |candidate: String| {
        if !candidate.is_empty() && !variants.contains(&candidate) {
            variants.push(candidate);
        }
    };

    push(normalize_numerals(preferred.as_str()));
    push(preferred);
    if let Some(counterpart) = counterpart {
        push(normalize_numerals(counterpart.as_str()));
    }
    variants
}

/// Resolves one scraped item to a catalog record, read-through a shared
/// [`QueryCache`].
pub struct Resolver {
    search: Arc<dyn MetadataSearch>,
    cache: Arc<QueryCache>,
    lookup_timeout: Duration,
    remote_calls: AtomicUsize,
}

impl Resolver {
    pub fn new(
        search: Arc<dyn MetadataSearch>,
        cache: Arc<QueryCache>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            search,
            cache,
            lookup_timeout,
            remote_calls: AtomicUsize::new(0),
        }
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// Remote lookups issued since construction (cache hits excluded).
    pub fn remote_calls(&self) -> usize {
        self.remote_calls.load(Ordering::Relaxed)
    }

    /// Try each query variant until one matches. `None` means every variant
    /// missed; that is a normal filtering outcome, not an error.
    pub async fn resolve(&self, item: &RawItem) -> Option<ResolvedRecord> {
        for query in query_variants(item) {
            if let MatchResult::Found(found) = self.lookup(&query).await {
                info!(
                    query = query.as_str(),
                    canonical_id = found.canonical_id.as_str(),
                    "Title matched"
                );

                let title = item
                    .alternate()
                    .unwrap_or_else(|| item.primary_title.trim())
                    .to_string();
                let poster_url = found
                    .image_url
                    .filter(|url| !url.trim().is_empty())
                    .or_else(|| item.fallback_image_url.clone());

                return Some(ResolvedRecord {
                    canonical_id: found.canonical_id,
                    type_tag: TypeTag::Series,
                    title,
                    poster_url,
                    description: episode_description(&item.episode_label),
                    poster_shape: PosterShape::Poster,
                });
            }
        }

        info!(title = item.primary_title.as_str(), "No catalog match for any query variant");
        None
    }

    /// Cache-first lookup. Timeouts and transport errors count as a miss for
    /// this variant and are not cached, so a later item may retry the string.
    async fn lookup(&self, query: &str) -> MatchResult {
        if let Some(cached) = self.cache.get(query).await {
            debug!(query, found = cached.is_found(), "Query cache hit");
            return cached;
        }
        debug!(query, "Query cache miss");

        self.remote_calls.fetch_add(1, Ordering::Relaxed);
        let provider = self.search.name();
        match tokio::time::timeout(self.lookup_timeout, self.search.search(query)).await {
            Ok(Ok(result)) => {
                self.cache.put(query, result.clone()).await;
                result
            }
            Ok(Err(e)) => {
                debug!(query, provider, error = %e, "Lookup failed, treating as no match");
                MatchResult::NotFound
            }
            Err(_) => {
                debug!(
                    query,
                    provider,
                    timeout_ms = self.lookup_timeout.as_millis() as u64,
                    "Lookup timed out, treating as no match"
                );
                MatchResult::NotFound
            }
        }
    }
}
