//! Raw culture report loading.
//!
//! Report files are concatenated in the order given. Columns are resolved by
//! name through [`ColumnNames`]; values are kept as strings so that timestamp
//! parsing and specimen normalization happen in one place downstream.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use mdro_model::ColumnNames;

use crate::csv_table::{cell, read_csv_table};
use crate::error::{IngestError, Result};

/// One source row with the columns the pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReport {
    /// Zero-based row position across all loaded files.
    pub source_row: usize,
    pub patient_id: String,
    pub specimen: String,
    pub performed_at: String,
    pub result_text: String,
}

/// Rows from every readable input, plus the inputs that were skipped.
#[derive(Debug, Default)]
pub struct ReportLoad {
    pub rows: Vec<RawReport>,
    pub files_loaded: Vec<PathBuf>,
    pub files_skipped: Vec<(PathBuf, String)>,
}

/// Read one report file, numbering rows from `first_row`.
pub fn read_report_file(
    path: &Path,
    columns: &ColumnNames,
    first_row: usize,
) -> Result<Vec<RawReport>> {
    let table = read_csv_table(path)?;
    let patient_idx = table
        .column_index(&columns.patient_id)
        .ok_or_else(|| IngestError::missing_column(&columns.patient_id, path))?;
    let timestamp_names = std::iter::once(columns.performed_at.as_str())
        .chain(columns.performed_at_fallbacks.iter().map(String::as_str));
    let timestamp_idx = table
        .first_column_index(timestamp_names)
        .ok_or_else(|| IngestError::missing_column(&columns.performed_at, path))?;
    let result_idx = table
        .column_index(&columns.result_text)
        .ok_or_else(|| IngestError::missing_column(&columns.result_text, path))?;
    let specimen_idx = table.column_index(&columns.specimen);
    if specimen_idx.is_none() {
        warn!(
            path = %path.display(),
            column = %columns.specimen,
            "specimen column missing; specimen left empty"
        );
    }

    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(offset, row)| RawReport {
            source_row: first_row + offset,
            patient_id: cell(row, patient_idx).to_string(),
            specimen: specimen_idx
                .map(|idx| cell(row, idx).to_string())
                .unwrap_or_default(),
            performed_at: cell(row, timestamp_idx).to_string(),
            result_text: cell(row, result_idx).to_string(),
        })
        .collect();
    Ok(rows)
}

/// Load and concatenate report files.
///
/// Unreadable files are logged and skipped. Fails only when no file could
/// be loaded.
pub fn load_reports(paths: &[PathBuf], columns: &ColumnNames) -> Result<ReportLoad> {
    let mut load = ReportLoad::default();
    for path in paths {
        match read_report_file(path, columns, load.rows.len()) {
            Ok(rows) => {
                debug!(path = %path.display(), row_count = rows.len(), "report file loaded");
                load.rows.extend(rows);
                load.files_loaded.push(path.clone());
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping report file");
                load.files_skipped.push((path.clone(), error.to_string()));
            }
        }
    }
    if load.files_loaded.is_empty() {
        return Err(IngestError::NoInputs { count: paths.len() });
    }
    info!(
        file_count = load.files_loaded.len(),
        skipped_count = load.files_skipped.len(),
        row_count = load.rows.len(),
        "reports loaded"
    );
    Ok(load)
}
