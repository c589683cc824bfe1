use std::fmt;

use crate::types::AsnCloudCount;

/// Cloud vs non-cloud instance totals over an ASN breakdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudSummary {
    pub total: i64,
    pub cloud: i64,
    pub non_cloud: i64,
    pub cloud_percentage: f64,
}

impl CloudSummary {
    pub fn from_rows(rows: &[AsnCloudCount]) -> Self {
        let (cloud, non_cloud) = rows.iter().fold((0i64, 0i64), |(c, n), r| {
            if r.is_cloud {
                (c + r.instance_count, n)
            } else {
                (c, n + r.instance_count)
            }
        });
        let total = cloud + non_cloud;
        let cloud_percentage = if total == 0 {
            0.0
        } else {
            cloud as f64 / total as f64 * 100.0
        };

        Self {
            total,
            cloud,
            non_cloud,
            cloud_percentage,
        }
    }
}

impl fmt::Display for CloudSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total instances: {}", self.total)?;
        writeln!(f, "Cloud instances: {}", self.cloud)?;
        writeln!(f, "Non-cloud instances: {}", self.non_cloud)?;
        write!(f, "Cloud percentage: {:.2}%", self.cloud_percentage)
    }
}
