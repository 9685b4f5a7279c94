#![allow(dead_code)]

use std::collections::BTreeSet;

use chrono::NaiveDate;

use mdro_model::{Isolate, OrganismGroup, ResistanceMarker};

pub fn isolate(
    row: usize,
    patient: &str,
    specimen: &str,
    date: (i32, u32, u32),
    organism: &str,
    markers: &[ResistanceMarker],
) -> Isolate {
    let (y, m, d) = date;
    Isolate {
        source_row: row,
        patient_id: patient.to_string(),
        specimen: specimen.to_string(),
        performed_at: NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(8, 0, 0))
            .expect("valid date"),
        organism: organism.to_string(),
        groups: OrganismGroup::ALL
            .into_iter()
            .filter(|group| group.matches(organism))
            .collect(),
        markers: markers.iter().copied().collect::<BTreeSet<_>>(),
        result_text: String::new(),
    }
}

pub fn with_text(mut isolate: Isolate, text: &str) -> Isolate {
    isolate.result_text = text.to_string();
    isolate
}
