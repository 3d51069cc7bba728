//! Resolver tests: variant fallback, caching, and failure handling against
//! MockSearch. No network.

use std::sync::Arc;
use std::time::Duration;

use animecat_common::{RawItem, TypeTag};
use animecat_resolver::testing::MockSearch;
use animecat_resolver::{QueryCache, Resolver};

const TIMEOUT: Duration = Duration::from_secs(2);

fn resolver_with(mock: Arc<MockSearch>) -> Resolver {
    Resolver::new(mock, Arc::new(QueryCache::new()), TIMEOUT)
}

// ---------------------------------------------------------------------------
// Fallback order
// ---------------------------------------------------------------------------

#[tokio::test]
async fn falls_back_through_variants_in_order() {
    let mock = Arc::new(MockSearch::new().on_query(
        "Lupin the Third",
        "kitsu:1",
        Some("https://img/l.jpg"),
    ));
    let resolver = resolver_with(mock.clone());

    let item = RawItem::new("Lupin the Third")
        .with_alternate("Lupin III")
        .with_episode("5");
    let record = resolver.resolve(&item).await.expect("counterpart should match");

    assert_eq!(mock.calls(), vec!["Lupin 3", "Lupin III", "Lupin the Third"]);
    assert_eq!(record.canonical_id, "kitsu:1");
    assert_eq!(record.title, "Lupin III", "display title is the preferred one");
    assert_eq!(record.poster_url.as_deref(), Some("https://img/l.jpg"));
    assert_eq!(record.description, "Latest episode: 5");
    assert_eq!(record.type_tag, TypeTag::Series);
}

#[tokio::test]
async fn stops_at_first_match() {
    let mock = Arc::new(
        MockSearch::new()
            .on_query("Overlord 4", "kitsu:999", None)
            .on_query("Overlord IV", "kitsu:other", None),
    );
    let resolver = resolver_with(mock.clone());

    let record = resolver.resolve(&RawItem::new("Overlord IV")).await.unwrap();

    assert_eq!(record.canonical_id, "kitsu:999");
    assert_eq!(mock.calls(), vec!["Overlord 4"]);
}

// ---------------------------------------------------------------------------
// Misses and failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn total_miss_returns_none_within_three_calls() {
    let mock = Arc::new(MockSearch::new());
    let resolver = resolver_with(mock.clone());

    let item = RawItem::new("Kidou Senshi II").with_alternate("Mobile Suit III");
    assert!(resolver.resolve(&item).await.is_none());
    assert_eq!(mock.call_count(), 3);
    assert_eq!(resolver.remote_calls(), 3);
}

#[tokio::test]
async fn transport_error_moves_on_to_next_variant() {
    let mock = Arc::new(
        MockSearch::new()
            .failing("Lupin 3")
            .on_query("Lupin III", "kitsu:1", None),
    );
    let resolver = resolver_with(mock.clone());

    let record = resolver.resolve(&RawItem::new("Lupin III")).await.unwrap();
    assert_eq!(record.canonical_id, "kitsu:1");
    assert_eq!(mock.calls(), vec!["Lupin 3", "Lupin III"]);
}

#[tokio::test]
async fn transport_errors_are_not_cached() {
    let mock = Arc::new(MockSearch::new().failing("Frieren"));
    let resolver = resolver_with(mock.clone());

    assert!(resolver.resolve(&RawItem::new("Frieren")).await.is_none());
    assert!(resolver.resolve(&RawItem::new("Frieren")).await.is_none());
    assert_eq!(mock.call_count(), 2);
    assert!(resolver.cache().is_empty().await);
}

#[tokio::test]
async fn timed_out_lookup_counts_as_miss() {
    let mock = Arc::new(
        MockSearch::new()
            .on_query("Frieren", "kitsu:46474", None)
            .with_delay(Duration::from_millis(200)),
    );
    let resolver = Resolver::new(
        mock.clone(),
        Arc::new(QueryCache::new()),
        Duration::from_millis(20),
    );

    assert!(resolver.resolve(&RawItem::new("Frieren")).await.is_none());
    assert_eq!(mock.call_count(), 1);
}

// ---------------------------------------------------------------------------
// Caching
// ---------------------------------------------------------------------------

#[tokio::test]
async fn negative_results_are_cached_across_items() {
    let mock = Arc::new(MockSearch::new().on_query("Overlord IV", "kitsu:999", None));
    let resolver = resolver_with(mock.clone());

    // "Overlord 4" misses for the first item and is served from cache for the second.
    resolver.resolve(&RawItem::new("Overlord IV")).await.unwrap();
    let second = resolver.resolve(&RawItem::new("Overlord 4")).await;

    assert!(second.is_none());
    assert_eq!(mock.calls(), vec!["Overlord 4", "Overlord IV"]);
    assert_eq!(resolver.cache().hits(), 1);
}

#[tokio::test]
async fn positive_results_are_served_from_cache() {
    let mock = Arc::new(MockSearch::new().on_query("Frieren", "kitsu:46474", None));
    let resolver = resolver_with(mock.clone());

    resolver.resolve(&RawItem::new("Frieren")).await.unwrap();
    let again = resolver.resolve(&RawItem::new("Frieren")).await.unwrap();

    assert_eq!(again.canonical_id, "kitsu:46474");
    assert_eq!(mock.call_count(), 1);
}

// ---------------------------------------------------------------------------
// Record construction
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fallback_image_used_when_match_has_none() {
    let mock = Arc::new(MockSearch::new().on_query("Dandadan", "kitsu:48000", None));
    let resolver = resolver_with(mock);

    let item = RawItem::new("Dandadan (SUB ITA)")
        .with_episode("?")
        .with_fallback_image("https://site/dandadan.jpg");
    let record = resolver.resolve(&item).await.unwrap();

    assert_eq!(record.poster_url.as_deref(), Some("https://site/dandadan.jpg"));
    assert_eq!(record.title, "Dandadan (SUB ITA)");
    assert_eq!(record.description, "Latest episode: ?");
}
