//! Typed errors for the store and export layers.
//!
//! Ranking failures never surface here: they degrade to the sentinel rank inside
//! the rank source.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading the node database.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database file could not be opened
    #[error("failed to open node database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },

    /// Aggregate query failed
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// Errors raised while writing an output table.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Temp file could not be renamed over the target
    #[error("failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

pub type ExportResult<T> = std::result::Result<T, ExportError>;
