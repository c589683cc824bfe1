use async_trait::async_trait;
use tracing::warn;

use asrank_client::{AsRankClient, AsRankError, AsnRecord};

use crate::traits::RankSource;
use crate::types::RankEntry;

/// Ranks ASNs through CAIDA ASRank. Every lookup failure collapses to the sentinel.
pub struct AsRankSource {
    client: AsRankClient,
}

impl AsRankSource {
    pub fn new(client: AsRankClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RankSource for AsRankSource {
    async fn fetch_rank(&self, key: &str, with_name: bool) -> RankEntry {
        entry_from(key, self.client.asn(key).await, with_name)
    }
}

/// Map an ASRank lookup result to a rank entry. Anything other than an in-range
/// rank becomes the sentinel.
fn entry_from(key: &str, result: asrank_client::Result<AsnRecord>, with_name: bool) -> RankEntry {
    match result {
        Ok(record) if record.rank < RankEntry::UNKNOWN_RANK => {
            let name = with_name.then(|| {
                record
                    .name
                    .unwrap_or_else(|| RankEntry::UNKNOWN_NAME.to_string())
            });
            RankEntry::new(record.rank, name)
        }
        Ok(record) => {
            warn!(asn = key, rank = record.rank, "ASRank returned out-of-range rank");
            RankEntry::unknown(with_name)
        }
        Err(AsRankError::NotFound(_)) => {
            warn!(asn = key, "ASN not ranked by ASRank");
            RankEntry::unknown(with_name)
        }
        Err(e) => {
            warn!(asn = key, error = %e, "ASRank lookup failed");
            RankEntry::unknown(with_name)
        }
    }
}
