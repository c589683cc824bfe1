pub mod config;
pub mod enrich;
pub mod error;
pub mod export;
pub mod source;
pub mod store;
pub mod summary;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;
pub mod types;

pub use config::EnrichConfig;
pub use enrich::{enrich_and_sort, EnrichOutcome, EnrichStats};
pub use error::{ExportError, ExportResult, StoreError, StoreResult};
pub use source::AsRankSource;
pub use store::NodeStore;
pub use summary::CloudSummary;
pub use traits::{EveryNth, MemoryRankCache, NoThrottle, RankCache, RankSource, Throttle};
pub use types::*;
