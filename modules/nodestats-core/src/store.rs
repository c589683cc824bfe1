//! Read-only aggregate queries over the `node_info` table.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::types::{AsnCloudCount, CloudProviderCount, CountryCount};

const ASN_CLOUD_COUNTS: &str = "
    SELECT
        CAST(asn AS TEXT) AS asn,
        CASE
            WHEN cloud_provider IS NULL OR TRIM(cloud_provider) = '' THEN 0
            ELSE 1
        END AS is_cloud,
        COUNT(*) AS instance_count
    FROM node_info
    WHERE asn IS NOT NULL
    GROUP BY asn, is_cloud
    ORDER BY instance_count DESC, asn ASC, is_cloud ASC";

const CLOUD_PROVIDER_COUNTS: &str = "
    SELECT
        CASE
            WHEN cloud_provider IS NULL OR TRIM(cloud_provider) = '' THEN 'None'
            ELSE cloud_provider
        END AS cloud_provider,
        COUNT(*) AS domain_count
    FROM node_info
    GROUP BY 1
    ORDER BY domain_count DESC, cloud_provider ASC";

const COUNTRY_COUNTS: &str = "
    SELECT country_code, COUNT(*) AS domain_count
    FROM node_info
    WHERE country_code IS NOT NULL AND TRIM(country_code) != ''
    GROUP BY country_code
    ORDER BY domain_count DESC, country_code ASC";

pub struct NodeStore {
    pool: SqlitePool,
}

impl NodeStore {
    /// Open an existing node database read-only. A missing file is an error.
    pub async fn open(path: &Path) -> StoreResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        info!(db = %path.display(), "Opened node database");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Instance counts per (ASN, cloud/non-cloud), largest first.
    pub async fn asn_cloud_counts(&self) -> StoreResult<Vec<AsnCloudCount>> {
        let rows = sqlx::query_as::<_, AsnCloudCount>(ASN_CLOUD_COUNTS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn cloud_provider_counts(&self) -> StoreResult<Vec<CloudProviderCount>> {
        let rows = sqlx::query_as::<_, CloudProviderCount>(CLOUD_PROVIDER_COUNTS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn country_counts(&self) -> StoreResult<Vec<CountryCount>> {
        let rows = sqlx::query_as::<_, CountryCount>(COUNTRY_COUNTS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
