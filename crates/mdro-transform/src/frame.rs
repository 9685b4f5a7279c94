//! Isolate tables as polars frames.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

use mdro_model::isolate::columns;
use mdro_model::{Isolate, OrganismGroup, ResistanceMarker};

/// Column order of a persisted isolate table.
pub fn isolate_columns() -> Vec<String> {
    let mut names = vec![
        columns::SOURCE_ROW.to_string(),
        columns::PATIENT_ID.to_string(),
        columns::SPECIMEN.to_string(),
        columns::PERFORMED_AT.to_string(),
        columns::ORGANISM.to_string(),
    ];
    names.extend(OrganismGroup::ALL.iter().map(|group| group.code().to_string()));
    names.extend(ResistanceMarker::ALL.iter().map(|marker| marker.column().to_string()));
    names.push(columns::RESULT_TEXT.to_string());
    names
}

fn string_column(name: &str, isolates: &[&Isolate], value: impl Fn(&Isolate) -> String) -> Column {
    let values: Vec<String> = isolates.iter().map(|isolate| value(isolate)).collect();
    Series::new(name.into(), values).into_column()
}

fn flag_column(name: &str, isolates: &[&Isolate], flag: impl Fn(&Isolate) -> bool) -> Column {
    let values: Vec<i32> = isolates
        .iter()
        .map(|isolate| i32::from(flag(isolate)))
        .collect();
    Series::new(name.into(), values).into_column()
}

/// Build the isolate table: identifiers, a 0/1 column per organism group
/// and resistance marker, then the report text.
pub fn isolate_frame<'a>(isolates: impl IntoIterator<Item = &'a Isolate>) -> PolarsResult<DataFrame> {
    let isolates: Vec<&Isolate> = isolates.into_iter().collect();
    let source_rows: Vec<u64> = isolates
        .iter()
        .map(|isolate| isolate.source_row as u64)
        .collect();
    let mut frame_columns = vec![
        Series::new(columns::SOURCE_ROW.into(), source_rows).into_column(),
        string_column(columns::PATIENT_ID, &isolates, |i| i.patient_id.clone()),
        string_column(columns::SPECIMEN, &isolates, |i| i.specimen.clone()),
        string_column(columns::PERFORMED_AT, &isolates, |i| {
            i.performed_at.format(columns::TIMESTAMP_FORMAT).to_string()
        }),
        string_column(columns::ORGANISM, &isolates, |i| i.organism.clone()),
    ];
    for group in OrganismGroup::ALL {
        frame_columns.push(flag_column(group.code(), &isolates, |i| i.in_group(group)));
    }
    for marker in ResistanceMarker::ALL {
        frame_columns.push(flag_column(marker.column(), &isolates, |i| {
            i.has_marker(marker)
        }));
    }
    frame_columns.push(string_column(columns::RESULT_TEXT, &isolates, |i| {
        i.result_text.clone()
    }));
    DataFrame::new(frame_columns)
}
