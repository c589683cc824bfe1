//! CSV output tables. Each table replaces its target file in one rename.

use std::fs::{self, File};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{ExportError, ExportResult};
use crate::types::{AsnCloudCount, CloudProviderCount, CountryCount, Ranked};

/// Write rank-sorted ASN rows: `rank,asn[,asn_name],is_cloud,instance_count`.
pub fn write_ranked_asns(
    path: &Path,
    rows: &[Ranked<AsnCloudCount>],
    with_names: bool,
) -> ExportResult<()> {
    write_atomic(path, |w| {
        if with_names {
            w.write_record(["rank", "asn", "asn_name", "is_cloud", "instance_count"])?;
        } else {
            w.write_record(["rank", "asn", "is_cloud", "instance_count"])?;
        }

        for r in rows {
            let rank = r.rank.rank.to_string();
            let is_cloud = cloud_flag(r.row.is_cloud);
            let count = r.row.instance_count.to_string();
            if with_names {
                let name = r.rank.name.as_deref().unwrap_or_default();
                w.write_record([rank.as_str(), r.row.asn.as_str(), name, is_cloud, count.as_str()])?;
            } else {
                w.write_record([rank.as_str(), r.row.asn.as_str(), is_cloud, count.as_str()])?;
            }
        }
        Ok(rows.len())
    })
}

/// `asn,is_cloud,instance_count` with a header row.
pub fn write_asn_cloud_counts(path: &Path, rows: &[AsnCloudCount]) -> ExportResult<()> {
    write_atomic(path, |w| {
        w.write_record(["asn", "is_cloud", "instance_count"])?;
        for r in rows {
            let count = r.instance_count.to_string();
            w.write_record([r.asn.as_str(), cloud_flag(r.is_cloud), count.as_str()])?;
        }
        Ok(rows.len())
    })
}

/// Headerless `provider,count` rows.
pub fn write_cloud_provider_counts(path: &Path, rows: &[CloudProviderCount]) -> ExportResult<()> {
    write_atomic(path, |w| {
        for r in rows {
            let count = r.domain_count.to_string();
            w.write_record([r.cloud_provider.as_str(), count.as_str()])?;
        }
        Ok(rows.len())
    })
}

/// Headerless `country_code,count` rows.
pub fn write_country_counts(path: &Path, rows: &[CountryCount]) -> ExportResult<()> {
    write_atomic(path, |w| {
        for r in rows {
            let count = r.domain_count.to_string();
            w.write_record([r.country_code.as_str(), count.as_str()])?;
        }
        Ok(rows.len())
    })
}

fn cloud_flag(is_cloud: bool) -> &'static str {
    if is_cloud {
        "1"
    } else {
        "0"
    }
}

fn write_atomic<F>(path: &Path, write: F) -> ExportResult<()>
where
    F: FnOnce(&mut csv::Writer<&mut File>) -> Result<usize, csv::Error>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let written = {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file_mut());
        let n = write(&mut writer)?;
        writer.flush().map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        n
    };

    tmp.persist(path).map_err(|e| ExportError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    info!(path = %path.display(), rows = written, "Wrote table");
    Ok(())
}
