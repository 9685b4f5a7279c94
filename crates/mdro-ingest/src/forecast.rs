//! Reader for forecast tables produced by an external model.
//!
//! Expected columns follow the usual forecasting-library naming (`ds`, `y`,
//! `yhat`, `yhat_lower`, `yhat_upper`); descriptive aliases are accepted too.
//! An `alert` column, when present, carries a precomputed flag.

use std::path::Path;

use tracing::{debug, warn};

use mdro_model::{ForecastPoint, PeriodKey};

use crate::csv_table::{CsvTable, cell, read_csv_table};
use crate::error::{IngestError, Result};
use crate::values::{parse_f64, parse_flag};

const PERIOD_COLUMNS: &[&str] = &["ds", "period", "month"];
const OBSERVED_COLUMNS: &[&str] = &["y", "observed"];
const EXPECTED_COLUMNS: &[&str] = &["yhat", "expected"];
const LOWER_COLUMNS: &[&str] = &["yhat_lower", "lower"];
const UPPER_COLUMNS: &[&str] = &["yhat_upper", "upper"];
const ALERT_COLUMNS: &[&str] = &["alert", "경보"];

fn optional(table: &CsvTable, names: &[&str]) -> Option<usize> {
    table.first_column_index(names.iter().copied())
}

/// Read a forecast table, sorted by period. Rows without a readable period
/// are dropped.
pub fn read_forecast_table(path: &Path) -> Result<Vec<ForecastPoint>> {
    let table = read_csv_table(path)?;
    let period_idx = optional(&table, PERIOD_COLUMNS)
        .ok_or_else(|| IngestError::missing_column(PERIOD_COLUMNS[0], path))?;
    let observed_idx = optional(&table, OBSERVED_COLUMNS);
    let expected_idx = optional(&table, EXPECTED_COLUMNS);
    let lower_idx = optional(&table, LOWER_COLUMNS);
    let upper_idx = optional(&table, UPPER_COLUMNS);
    let alert_idx = optional(&table, ALERT_COLUMNS);

    let number = |row: &[String], idx: Option<usize>| idx.and_then(|i| parse_f64(cell(row, i)));

    let mut points = Vec::with_capacity(table.row_count());
    let mut dropped = 0usize;
    for row in &table.rows {
        let Some(period) = PeriodKey::parse(cell(row, period_idx)) else {
            dropped += 1;
            continue;
        };
        points.push(ForecastPoint {
            period,
            observed: number(row, observed_idx),
            expected: number(row, expected_idx),
            lower: number(row, lower_idx),
            upper: number(row, upper_idx),
            alert: alert_idx
                .map(|idx| cell(row, idx))
                .filter(|raw| !raw.trim().is_empty())
                .map(parse_flag),
        });
    }
    if dropped > 0 {
        warn!(path = %path.display(), dropped, "forecast rows without a period dropped");
    }
    points.sort_by_key(|point| point.period);
    debug!(path = %path.display(), point_count = points.len(), "forecast table loaded");
    Ok(points)
}
