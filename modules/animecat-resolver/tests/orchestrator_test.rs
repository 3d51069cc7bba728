//! Orchestrator tests: dedup under concurrency, ordering, and reporting.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use animecat_common::{OutputOrder, RawItem, ResolvedRecord};
use animecat_resolver::testing::{item, MockSearch};
use animecat_resolver::{Orchestrator, OrchestratorOptions, QueryCache, Resolver};

fn orchestrator(mock: Arc<MockSearch>, workers: usize, order: OutputOrder) -> Orchestrator {
    let resolver = Arc::new(Resolver::new(
        mock,
        Arc::new(QueryCache::new()),
        Duration::from_secs(2),
    ));
    Orchestrator::new(resolver, OrchestratorOptions { workers, order })
}

fn ids(records: &[ResolvedRecord]) -> Vec<&str> {
    records.iter().map(|r| r.canonical_id.as_str()).collect()
}

fn id_set(records: &[ResolvedRecord]) -> BTreeSet<String> {
    records.iter().map(|r| r.canonical_id.clone()).collect()
}

fn sample_mock() -> MockSearch {
    MockSearch::new()
        .on_query("Frieren", "kitsu:46474", Some("https://img/frieren.jpg"))
        .on_query("Overlord 4", "kitsu:999", Some("u1"))
        .on_query("One Piece", "kitsu:12", None)
        .on_query("Lupin the Third", "kitsu:1", None)
        .on_query("Dandadan", "kitsu:48000", None)
}

fn sample_batch() -> Vec<RawItem> {
    vec![
        item("Frieren", "28"),
        item("Overlord IV", "12"),
        item("Unknown Show", "1"),
        item("One Piece (ITA)", "1120"),
        RawItem::new("Lupin the Third").with_alternate("Lupin III"),
        item("Overlord 4", "13"),
        item("Dandadan", "?"),
        item("One Piece", "1121"),
    ]
}

// ---------------------------------------------------------------------------
// End-to-end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn overlord_numerals_collapse_to_one_record() {
    let mock = Arc::new(MockSearch::new().on_query("Overlord 4", "k:999", Some("u1")));
    let orch = orchestrator(mock, 4, OutputOrder::Input);

    let records = orch
        .resolve_all(vec![item("Overlord IV", "12"), item("Overlord 4", "13")])
        .await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].canonical_id, "k:999");
    assert_eq!(records[0].poster_url.as_deref(), Some("u1"));
}

#[tokio::test]
async fn empty_batch_yields_empty_catalog() {
    let mock = Arc::new(MockSearch::new());
    let orch = orchestrator(mock.clone(), 8, OutputOrder::Input);

    let run = orch.resolve_all_with_report(Vec::new()).await;
    assert!(run.records.is_empty());
    assert_eq!(run.report.total, 0);
    assert_eq!(mock.call_count(), 0);
}

// ---------------------------------------------------------------------------
// Dedup under concurrency
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicates_keep_one_record_per_id() {
    for _ in 0..20 {
        // Distinct query strings that all map to the same ID, with a delay so
        // workers finish at nearly the same moment.
        let mock = Arc::new(
            MockSearch::new()
                .on_query("Shingeki no Kyojin", "kitsu:7442", None)
                .on_query("Attack on Titan", "kitsu:7442", None)
                .on_query("AoT", "kitsu:7442", None)
                .on_query("Titan", "kitsu:7442", None)
                .with_delay(Duration::from_millis(5)),
        );
        let orch = orchestrator(mock, 4, OutputOrder::Acceptance);

        let run = orch
            .resolve_all_with_report(vec![
                item("Shingeki no Kyojin", "1"),
                item("Attack on Titan", "2"),
                item("AoT", "3"),
                item("Titan", "4"),
            ])
            .await;

        assert_eq!(ids(&run.records), vec!["kitsu:7442"]);
        assert_eq!(run.report.duplicates, 3);
        assert_eq!(run.report.resolved, 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn ids_are_unique_for_any_pool_size() {
    for workers in [1, 2, 3, 8, 32] {
        let orch = orchestrator(Arc::new(sample_mock()), workers, OutputOrder::Acceptance);
        let records = orch.resolve_all(sample_batch()).await;

        let unique = id_set(&records);
        assert_eq!(unique.len(), records.len(), "duplicate ID with {workers} workers");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn pool_size_does_not_change_the_id_set() {
    let serial = orchestrator(Arc::new(sample_mock()), 1, OutputOrder::Acceptance)
        .resolve_all(sample_batch())
        .await;
    let parallel = orchestrator(Arc::new(sample_mock()), 8, OutputOrder::Acceptance)
        .resolve_all(sample_batch())
        .await;

    assert_eq!(id_set(&serial), id_set(&parallel));
    assert_eq!(
        id_set(&serial),
        ["kitsu:1", "kitsu:12", "kitsu:46474", "kitsu:48000", "kitsu:999"]
            .into_iter()
            .map(String::from)
            .collect::<BTreeSet<String>>()
    );
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn single_worker_keeps_first_occurrence() {
    let orch = orchestrator(Arc::new(sample_mock()), 1, OutputOrder::Acceptance);
    let records = orch.resolve_all(sample_batch()).await;

    assert_eq!(
        ids(&records),
        vec!["kitsu:46474", "kitsu:999", "kitsu:12", "kitsu:1", "kitsu:48000"]
    );
    let overlord = records.iter().find(|r| r.canonical_id == "kitsu:999").unwrap();
    assert_eq!(overlord.description, "Latest episode: 12");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn input_order_is_restored_after_parallel_resolution() {
    // Survivors are sorted by input index. Items 0, 3, 4 and 6 have unique IDs,
    // so their relative order is fixed regardless of which duplicate wins.
    let orch = orchestrator(Arc::new(sample_mock()), 8, OutputOrder::Input);
    let records = orch.resolve_all(sample_batch()).await;

    let positions: Vec<usize> = ["kitsu:46474", "kitsu:1", "kitsu:48000"]
        .iter()
        .map(|id| records.iter().position(|r| r.canonical_id == *id).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "got {:?}", ids(&records));
    assert_eq!(records[0].canonical_id, "kitsu:46474");
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

#[tokio::test]
async fn report_counts_each_outcome() {
    let mock = Arc::new(sample_mock());
    let orch = orchestrator(mock.clone(), 1, OutputOrder::Input);

    let mut batch = sample_batch();
    batch.push(RawItem::new("   ").with_episode("3"));
    batch.push(RawItem::default());

    let run = orch.resolve_all_with_report(batch).await;
    let report = run.report;

    assert_eq!(report.total, 10);
    assert_eq!(report.malformed, 2);
    assert_eq!(report.unresolved, 1);
    assert_eq!(report.duplicates, 2);
    assert_eq!(report.resolved, 5);
    assert_eq!(report.remote_calls, mock.call_count());
    assert!(report.cache_hits >= 1, "second Overlord 4 should hit the cache");
}

#[tokio::test]
async fn malformed_items_never_reach_the_search_service() {
    let mock = Arc::new(sample_mock());
    let orch = orchestrator(mock.clone(), 2, OutputOrder::Input);

    let run = orch
        .resolve_all_with_report(vec![RawItem::default(), RawItem::new("\t")])
        .await;

    assert!(run.records.is_empty());
    assert_eq!(run.report.malformed, 2);
    assert_eq!(mock.call_count(), 0);
}
