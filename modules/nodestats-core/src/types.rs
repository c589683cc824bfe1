use std::fmt;

// --- Grouped count rows (one per aggregate query) ---

/// Nodes sharing an ASN, split by whether they sit on a cloud provider.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AsnCloudCount {
    pub asn: String,
    pub is_cloud: bool,
    pub instance_count: i64,
}

/// Domains per cloud provider. Blank or missing providers are reported as `None`.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CloudProviderCount {
    pub cloud_provider: String,
    pub domain_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CountryCount {
    pub country_code: String,
    pub domain_count: i64,
}

// --- Rank enrichment ---

/// A row that can be looked up in a ranking service.
pub trait RankKey {
    /// Canonical lookup key. Rows with equal keys share one lookup.
    fn rank_key(&self) -> String;
}

impl RankKey for AsnCloudCount {
    fn rank_key(&self) -> String {
        self.asn.trim().to_string()
    }
}

/// Rank of one key. Lower is more significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry {
    pub rank: u32,
    pub name: Option<String>,
}

impl RankEntry {
    /// Sentinel for "rank unavailable". Greater than any rank a source may
    /// report; sources must reject ranks at or above it.
    pub const UNKNOWN_RANK: u32 = u32::MAX;

    pub const UNKNOWN_NAME: &'static str = "Unknown";

    pub fn new(rank: u32, name: Option<String>) -> Self {
        Self { rank, name }
    }

    /// The degraded entry recorded when a lookup fails.
    pub fn unknown(with_name: bool) -> Self {
        Self {
            rank: Self::UNKNOWN_RANK,
            name: with_name.then(|| Self::UNKNOWN_NAME.to_string()),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.rank == Self::UNKNOWN_RANK
    }
}

impl fmt::Display for RankEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            write!(f, "unranked")?;
        } else {
            write!(f, "#{}", self.rank)?;
        }
        if let Some(ref name) = self.name {
            write!(f, " ({name})")?;
        }
        Ok(())
    }
}

/// A grouped row annotated with the rank entry of its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked<R> {
    pub rank: RankEntry,
    pub row: R,
}
