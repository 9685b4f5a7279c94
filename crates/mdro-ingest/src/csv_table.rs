use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// A CSV file loaded as trimmed strings.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Index of a column by exact name, falling back to a case-insensitive match.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = normalize_header(name);
        self.headers
            .iter()
            .position(|header| *header == wanted)
            .or_else(|| {
                self.headers
                    .iter()
                    .position(|header| header.eq_ignore_ascii_case(&wanted))
            })
    }

    /// Index of the first column present among `names`.
    pub fn first_column_index<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Option<usize> {
        names.into_iter().find_map(|name| self.column_index(name))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    // Report text keeps its interior line structure; only the edges are trimmed.
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Cell value at `idx`, or an empty string for short rows.
pub fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// Read a CSV file whose first non-empty row is the header.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::csv(path, source))?;
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::csv(path, source))?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        match &headers {
            None => {
                headers = Some(record.iter().map(normalize_header).collect());
            }
            Some(names) => {
                let mut row = Vec::with_capacity(names.len());
                for idx in 0..names.len() {
                    row.push(normalize_cell(record.get(idx).unwrap_or("")));
                }
                rows.push(row);
            }
        }
    }
    Ok(CsvTable {
        headers: headers.unwrap_or_default(),
        rows,
    })
}
