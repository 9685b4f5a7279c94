//! Reader for wide numeric tables (one column per series).

use std::path::Path;

use crate::csv_table::{cell, read_csv_table};
use crate::error::{IngestError, Result};
use crate::values::parse_f64;

/// One named numeric column; blank or non-numeric cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Read the named columns from a CSV file, in the order requested.
pub fn read_numeric_columns(path: &Path, names: &[String]) -> Result<Vec<NumericColumn>> {
    let table = read_csv_table(path)?;
    names
        .iter()
        .map(|name| {
            let idx = table
                .column_index(name)
                .ok_or_else(|| IngestError::missing_column(name, path))?;
            let values = table
                .rows
                .iter()
                .map(|row| parse_f64(cell(row, idx)))
                .collect();
            Ok(NumericColumn {
                name: name.clone(),
                values,
            })
        })
        .collect()
}
