// Test doubles for the enrichment pipeline and the node store.
//
// - MockRankSource (RankSource) — HashMap-based key→rank, records every call
// - RecordingThrottle (Throttle) — records fetch counts, zero-length pauses
// - seeded_store — in-memory SQLite with the node_info schema

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::store::NodeStore;
use crate::traits::{RankSource, Throttle};
use crate::types::{AsnCloudCount, RankEntry};

// ---------------------------------------------------------------------------
// MockRankSource
// ---------------------------------------------------------------------------

/// Canned ranks per key. Unregistered keys degrade to the sentinel, as a real
/// source does on failure.
#[derive(Default)]
pub struct MockRankSource {
    ranks: HashMap<String, (u32, Option<String>)>,
    calls: Mutex<Vec<String>>,
}

impl MockRankSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_key(mut self, key: &str, rank: u32) -> Self {
        self.ranks.insert(key.to_string(), (rank, None));
        self
    }

    pub fn on_key_named(mut self, key: &str, rank: u32, name: &str) -> Self {
        self.ranks
            .insert(key.to_string(), (rank, Some(name.to_string())));
        self
    }

    /// Keys passed to `fetch_rank`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RankSource for MockRankSource {
    async fn fetch_rank(&self, key: &str, with_name: bool) -> RankEntry {
        self.calls.lock().unwrap().push(key.to_string());
        match self.ranks.get(key) {
            Some((rank, name)) => RankEntry::new(
                *rank,
                with_name.then(|| {
                    name.clone()
                        .unwrap_or_else(|| RankEntry::UNKNOWN_NAME.to_string())
                }),
            ),
            None => RankEntry::unknown(with_name),
        }
    }
}

// ---------------------------------------------------------------------------
// RecordingThrottle
// ---------------------------------------------------------------------------

/// Pauses (for zero time) on every `every`-th fetch and remembers when.
pub struct RecordingThrottle {
    every: usize,
    pub consulted: Vec<usize>,
    pub paused_at: Vec<usize>,
}

impl RecordingThrottle {
    pub fn every(every: usize) -> Self {
        Self {
            every,
            consulted: Vec::new(),
            paused_at: Vec::new(),
        }
    }
}

impl Throttle for RecordingThrottle {
    fn pause_after(&mut self, fetched: usize) -> Option<Duration> {
        self.consulted.push(fetched);
        if self.every > 0 && fetched % self.every == 0 {
            self.paused_at.push(fetched);
            Some(Duration::ZERO)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Row + store fixtures
// ---------------------------------------------------------------------------

pub fn asn_row(asn: &str, is_cloud: bool, instance_count: i64) -> AsnCloudCount {
    AsnCloudCount {
        asn: asn.to_string(),
        is_cloud,
        instance_count,
    }
}

/// One `node_info` row: (domain, asn, cloud_provider, country_code).
pub type NodeFixture<'a> = (&'a str, Option<&'a str>, Option<&'a str>, Option<&'a str>);

/// In-memory node database holding `nodes`.
pub async fn seeded_store(nodes: &[NodeFixture<'_>]) -> NodeStore {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").expect("memory url");
    // One never-recycled connection: the in-memory database lives and dies with it.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("in-memory sqlite");

    sqlx::query(
        "CREATE TABLE node_info (
            domain         TEXT PRIMARY KEY,
            status         TEXT,
            ip             TEXT,
            asn            TEXT,
            country_code   TEXT,
            user_count     INTEGER,
            post_count     INTEGER,
            cloud_provider TEXT,
            last_updated   TIMESTAMP
        )",
    )
    .execute(&pool)
    .await
    .expect("create node_info");

    for (domain, asn, cloud_provider, country_code) in nodes {
        sqlx::query(
            "INSERT INTO node_info (domain, status, asn, cloud_provider, country_code)
             VALUES (?, 'success', ?, ?, ?)",
        )
        .bind(*domain)
        .bind(*asn)
        .bind(*cloud_provider)
        .bind(*country_code)
        .execute(&pool)
        .await
        .expect("insert node");
    }

    NodeStore::from_pool(pool)
}
