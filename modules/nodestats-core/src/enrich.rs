//! ASN rank enrichment: dedup keys, look each up once, join, sort by rank.

use tracing::{debug, info};

use crate::traits::{RankCache, RankSource, Throttle};
use crate::types::{RankEntry, RankKey, Ranked};

/// Observational counters for one enrichment run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichStats {
    pub rows: usize,
    /// External lookups performed (one per distinct uncached key).
    pub lookups: usize,
    /// Rows that ended up with the sentinel rank.
    pub unknown: usize,
}

#[derive(Debug, Clone)]
pub struct EnrichOutcome<R> {
    pub rows: Vec<Ranked<R>>,
    pub stats: EnrichStats,
}

/// Annotate `rows` with the rank of their key and sort them by ascending rank.
///
/// Each distinct key missing from `cache` is fetched exactly once, in first-seen
/// order. `throttle` is consulted after every new fetch and the pipeline sleeps
/// for whatever pause it returns. Failed lookups carry the sentinel rank and sort
/// last. The sort is stable, so equal ranks keep their input order.
pub async fn enrich_and_sort<R: RankKey>(
    rows: Vec<R>,
    source: &dyn RankSource,
    cache: &mut dyn RankCache,
    throttle: &mut dyn Throttle,
    with_name: bool,
) -> EnrichOutcome<R> {
    let mut lookups = 0usize;
    let mut keyed = Vec::with_capacity(rows.len());

    for row in rows {
        let key = row.rank_key();
        if cache.get(&key).is_none() {
            let entry = source.fetch_rank(&key, with_name).await;
            debug!(key = %key, rank = %entry, "Fetched rank");
            cache.insert(key.clone(), entry);
            lookups += 1;

            if let Some(pause) = throttle.pause_after(lookups) {
                info!(lookups, pause_ms = pause.as_millis() as u64, "Rank lookups in progress");
                tokio::time::sleep(pause).await;
            }
        }
        keyed.push((key, row));
    }

    let mut ranked: Vec<Ranked<R>> = keyed
        .into_iter()
        .map(|(key, row)| Ranked {
            rank: cache
                .get(&key)
                .unwrap_or_else(|| RankEntry::unknown(with_name)),
            row,
        })
        .collect();

    // Vec::sort_by_key is stable.
    ranked.sort_by_key(|r| r.rank.rank);

    let stats = EnrichStats {
        rows: ranked.len(),
        lookups,
        unknown: ranked.iter().filter(|r| r.rank.is_unknown()).count(),
    };
    info!(
        rows = stats.rows,
        lookups = stats.lookups,
        unknown = stats.unknown,
        "Rank enrichment complete"
    );

    EnrichOutcome { rows: ranked, stats }
}
