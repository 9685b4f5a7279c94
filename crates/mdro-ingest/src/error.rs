//! Error types for report ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading source tables.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open or parse a CSV file.
    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Required column not found in a table.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// None of the given inputs could be loaded.
    #[error("no readable input files among {count} path(s)")]
    NoInputs { count: usize },
}

impl IngestError {
    pub(crate) fn csv(path: &std::path::Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn missing_column(column: &str, path: &std::path::Path) -> Self {
        Self::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
