// Seams of the enrichment pipeline.
//
// RankSource — one lookup per key; never fails, degrades to the sentinel entry.
// RankCache  — run-scoped key → entry store, consulted before every lookup.
// Throttle   — decides whether to pause after each newly fetched key.
//
// Tests swap in MockRankSource / RecordingThrottle from `testing` and run
// without network or sleeps.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::types::RankEntry;

// ---------------------------------------------------------------------------
// RankSource
// ---------------------------------------------------------------------------

#[async_trait]
pub trait RankSource: Send + Sync {
    /// Rank of `key`. Any failure yields `RankEntry::unknown(with_name)`.
    async fn fetch_rank(&self, key: &str, with_name: bool) -> RankEntry;
}

// ---------------------------------------------------------------------------
// RankCache
// ---------------------------------------------------------------------------

pub trait RankCache: Send {
    fn get(&self, key: &str) -> Option<RankEntry>;

    fn insert(&mut self, key: String, entry: RankEntry);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Plain in-memory cache. No expiry; lives for one run.
#[derive(Debug, Default)]
pub struct MemoryRankCache {
    entries: HashMap<String, RankEntry>,
}

impl MemoryRankCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RankCache for MemoryRankCache {
    fn get(&self, key: &str) -> Option<RankEntry> {
        self.entries.get(key).cloned()
    }

    fn insert(&mut self, key: String, entry: RankEntry) {
        self.entries.insert(key, entry);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

// ---------------------------------------------------------------------------
// Throttle
// ---------------------------------------------------------------------------

pub trait Throttle: Send {
    /// Called once per newly fetched key with the running fetch count (1-based).
    fn pause_after(&mut self, fetched: usize) -> Option<Duration>;
}

/// Pause for `pause` after every `every`-th new lookup.
#[derive(Debug, Clone, Copy)]
pub struct EveryNth {
    pub every: usize,
    pub pause: Duration,
}

impl EveryNth {
    pub fn new(every: usize, pause: Duration) -> Self {
        Self { every, pause }
    }
}

impl Default for EveryNth {
    fn default() -> Self {
        Self {
            every: 10,
            pause: Duration::from_secs(1),
        }
    }
}

impl Throttle for EveryNth {
    fn pause_after(&mut self, fetched: usize) -> Option<Duration> {
        if self.every == 0 || self.pause.is_zero() {
            return None;
        }
        (fetched % self.every == 0).then_some(self.pause)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoThrottle;

impl Throttle for NoThrottle {
    fn pause_after(&mut self, _fetched: usize) -> Option<Duration> {
        None
    }
}
