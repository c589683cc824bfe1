//! Rank enrichment pipeline behaviour against mock sources. No network, no sleeps.

use nodestats_core::testing::{asn_row, MockRankSource, RecordingThrottle};
use nodestats_core::{
    enrich_and_sort, AsnCloudCount, MemoryRankCache, NoThrottle, RankCache, RankEntry, RankKey,
};

#[derive(Debug, Clone, PartialEq)]
struct Row {
    key: &'static str,
    count: i64,
}

impl RankKey for Row {
    fn rank_key(&self) -> String {
        self.key.to_string()
    }
}

fn row(key: &'static str, count: i64) -> Row {
    Row { key, count }
}

fn summary(out: &[nodestats_core::Ranked<Row>]) -> Vec<(&'static str, u32, i64)> {
    out.iter().map(|r| (r.row.key, r.rank.rank, r.row.count)).collect()
}

#[tokio::test]
async fn sorts_by_rank_and_keeps_order_of_equal_ranks() {
    let source = MockRankSource::new().on_key("A", 10).on_key("B", 5);
    let mut cache = MemoryRankCache::new();

    let out = enrich_and_sort(
        vec![row("A", 5), row("B", 3), row("A", 2)],
        &source,
        &mut cache,
        &mut NoThrottle,
        false,
    )
    .await;

    assert_eq!(summary(&out.rows), vec![("B", 5, 3), ("A", 10, 5), ("A", 10, 2)]);
    assert_eq!(out.stats.rows, 3);
    assert_eq!(out.stats.lookups, 2);
    assert_eq!(out.stats.unknown, 0);
}

#[tokio::test]
async fn one_lookup_per_distinct_key_in_first_seen_order() {
    let source = MockRankSource::new()
        .on_key("A", 1)
        .on_key("B", 2)
        .on_key("C", 3);
    let mut cache = MemoryRankCache::new();

    let rows = vec![
        row("C", 1),
        row("A", 1),
        row("C", 1),
        row("B", 1),
        row("A", 1),
        row("C", 1),
    ];
    enrich_and_sort(rows, &source, &mut cache, &mut NoThrottle, false).await;

    assert_eq!(source.calls(), vec!["C", "A", "B"]);
    assert_eq!(cache.len(), 3);
}

#[tokio::test]
async fn failed_key_sinks_to_bottom_without_touching_others() {
    // "C" is not registered, so the mock degrades it like a failed lookup.
    let source = MockRankSource::new()
        .on_key("A", 700)
        .on_key("B", 90_000);
    let mut cache = MemoryRankCache::new();

    let out = enrich_and_sort(
        vec![row("C", 1), row("A", 4), row("B", 2), row("C", 6)],
        &source,
        &mut cache,
        &mut NoThrottle,
        false,
    )
    .await;

    assert_eq!(
        summary(&out.rows),
        vec![
            ("A", 700, 4),
            ("B", 90_000, 2),
            ("C", RankEntry::UNKNOWN_RANK, 1),
            ("C", RankEntry::UNKNOWN_RANK, 6),
        ]
    );
    assert_eq!(out.stats.unknown, 2);
    assert_eq!(source.call_count(), 3);
}

#[tokio::test]
async fn names_are_attached_when_requested() {
    let source = MockRankSource::new().on_key_named("13335", 30, "CLOUDFLARENET");
    let mut cache = MemoryRankCache::new();

    let out = enrich_and_sort(
        vec![asn_row("13335", true, 12), asn_row("64512", false, 1)],
        &source,
        &mut cache,
        &mut NoThrottle,
        true,
    )
    .await;

    let names: Vec<Option<&str>> = out.rows.iter().map(|r| r.rank.name.as_deref()).collect();
    assert_eq!(names, vec![Some("CLOUDFLARENET"), Some(RankEntry::UNKNOWN_NAME)]);
}

#[tokio::test]
async fn asn_rows_sharing_an_asn_share_one_lookup() {
    let source = MockRankSource::new().on_key("16509", 8);
    let mut cache = MemoryRankCache::new();

    let rows: Vec<AsnCloudCount> = vec![
        asn_row("16509", true, 40),
        asn_row(" 16509", false, 3),
    ];
    let out = enrich_and_sort(rows, &source, &mut cache, &mut NoThrottle, false).await;

    assert_eq!(source.calls(), vec!["16509"]);
    assert!(out.rows.iter().all(|r| r.rank.rank == 8));
    // Untrimmed ASN text is kept on the row.
    assert_eq!(out.rows[1].row.asn, " 16509");
}

#[tokio::test]
async fn prepopulated_cache_skips_lookups() {
    let source = MockRankSource::new().on_key("A", 1);
    let mut cache = MemoryRankCache::new();
    cache.insert("A".into(), RankEntry::new(42, None));

    let out = enrich_and_sort(vec![row("A", 1)], &source, &mut cache, &mut NoThrottle, false).await;

    assert_eq!(source.call_count(), 0);
    assert_eq!(out.rows[0].rank.rank, 42);
    assert_eq!(out.stats.lookups, 0);
}

#[tokio::test]
async fn throttle_counts_new_keys_not_rows() {
    let mut source = MockRankSource::new();
    let keys: Vec<&'static str> = vec![
        "k01", "k02", "k03", "k04", "k05", "k06", "k07", "k08", "k09", "k10", "k11", "k12",
        "k13", "k14", "k15", "k16", "k17", "k18", "k19", "k20", "k21", "k22", "k23",
    ];
    for (i, k) in keys.iter().enumerate() {
        source = source.on_key(k, i as u32 + 1);
    }

    // Every key appears twice; the repeats are cache hits.
    let rows: Vec<Row> = keys.iter().chain(keys.iter()).map(|&k| row(k, 1)).collect();
    let mut cache = MemoryRankCache::new();
    let mut throttle = RecordingThrottle::every(10);

    enrich_and_sort(rows, &source, &mut cache, &mut throttle, false).await;

    assert_eq!(throttle.consulted, (1..=23).collect::<Vec<_>>());
    assert_eq!(throttle.paused_at, vec![10, 20]);
}

#[tokio::test]
async fn empty_input_makes_no_calls() {
    let source = MockRankSource::new();
    let mut cache = MemoryRankCache::new();

    let out = enrich_and_sort(Vec::<Row>::new(), &source, &mut cache, &mut NoThrottle, false).await;

    assert!(out.rows.is_empty());
    assert_eq!(source.call_count(), 0);
}

#[tokio::test]
async fn repeated_runs_are_identical() {
    let source = MockRankSource::new().on_key("A", 3).on_key("B", 3).on_key("C", 1);
    let rows = vec![row("A", 1), row("B", 2), row("C", 3), row("D", 4), row("A", 5)];

    let first = enrich_and_sort(
        rows.clone(),
        &source,
        &mut MemoryRankCache::new(),
        &mut NoThrottle,
        true,
    )
    .await;
    let second = enrich_and_sort(rows, &source, &mut MemoryRankCache::new(), &mut NoThrottle, true).await;

    assert_eq!(first.rows, second.rows);
    // Fresh cache per run: every run repeats all lookups.
    assert_eq!(source.call_count(), 8);
}
