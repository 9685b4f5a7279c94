//! Reader for persisted isolate tables.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::{info, warn};

use mdro_model::isolate::columns;
use mdro_model::{Isolate, OrganismGroup, ResistanceMarker};

use crate::csv_table::{cell, read_csv_table};
use crate::error::{IngestError, Result};
use crate::values::parse_flag;

/// Isolates read from a table, with the number of rows that could not be used.
#[derive(Debug, Default)]
pub struct IsolateLoad {
    pub isolates: Vec<Isolate>,
    pub skipped: usize,
}

fn parse_performed_at(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, columns::TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Read an isolate table written by the preprocessing stage.
///
/// Indicator columns that are absent are treated as all zero. Rows without
/// a patient, organism, or readable timestamp are skipped.
pub fn read_isolate_table(path: &Path) -> Result<IsolateLoad> {
    let table = read_csv_table(path)?;
    let required = |name: &str| {
        table
            .column_index(name)
            .ok_or_else(|| IngestError::missing_column(name, path))
    };
    let patient_idx = required(columns::PATIENT_ID)?;
    let specimen_idx = required(columns::SPECIMEN)?;
    let performed_idx = required(columns::PERFORMED_AT)?;
    let organism_idx = required(columns::ORGANISM)?;
    let source_idx = table.column_index(columns::SOURCE_ROW);
    let text_idx = table.column_index(columns::RESULT_TEXT);
    let group_columns: Vec<(OrganismGroup, usize)> = OrganismGroup::ALL
        .into_iter()
        .filter_map(|group| table.column_index(group.code()).map(|idx| (group, idx)))
        .collect();
    let marker_columns: Vec<(ResistanceMarker, usize)> = ResistanceMarker::ALL
        .into_iter()
        .filter_map(|marker| table.column_index(marker.column()).map(|idx| (marker, idx)))
        .collect();

    let mut load = IsolateLoad::default();
    for (row_idx, row) in table.rows.iter().enumerate() {
        let patient_id = cell(row, patient_idx).trim();
        let organism = cell(row, organism_idx).trim();
        let performed_at = parse_performed_at(cell(row, performed_idx));
        let (Some(performed_at), false, false) =
            (performed_at, patient_id.is_empty(), organism.is_empty())
        else {
            load.skipped += 1;
            continue;
        };
        let source_row = source_idx
            .and_then(|idx| cell(row, idx).trim().parse::<usize>().ok())
            .unwrap_or(row_idx);
        let groups: BTreeSet<OrganismGroup> = group_columns
            .iter()
            .filter(|(_, idx)| parse_flag(cell(row, *idx)))
            .map(|(group, _)| *group)
            .collect();
        let markers: BTreeSet<ResistanceMarker> = marker_columns
            .iter()
            .filter(|(_, idx)| parse_flag(cell(row, *idx)))
            .map(|(marker, _)| *marker)
            .collect();
        load.isolates.push(Isolate {
            source_row,
            patient_id: patient_id.to_string(),
            specimen: cell(row, specimen_idx).trim().to_string(),
            performed_at,
            organism: organism.to_string(),
            groups,
            markers,
            result_text: text_idx
                .map(|idx| cell(row, idx).to_string())
                .unwrap_or_default(),
        });
    }
    if load.skipped > 0 {
        warn!(
            path = %path.display(),
            skipped = load.skipped,
            "isolate rows skipped"
        );
    }
    info!(
        path = %path.display(),
        isolate_count = load.isolates.len(),
        "isolate table loaded"
    );
    Ok(load)
}
