//! Tests for first-isolation deduplication.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use mdro_model::{Indicator, Isolate, OrganismGroup, Period, ResistanceMarker};
use mdro_transform::{IsolationFilter, IsolationKey, first_isolation};

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("base date")
}

fn isolate(row: usize, patient: &str, specimen: &str, day: i64, organism: &str) -> Isolate {
    Isolate {
        source_row: row,
        patient_id: patient.to_string(),
        specimen: specimen.to_string(),
        performed_at: base() + Duration::days(day),
        organism: organism.to_string(),
        groups: BTreeSet::new(),
        markers: BTreeSet::new(),
        result_text: String::new(),
    }
}

#[test]
fn keeps_earliest_per_month() {
    let rows = vec![
        isolate(0, "P1", "Sputum", 20, "A"),
        isolate(1, "P1", "Sputum", 3, "A"),
        isolate(2, "P1", "Sputum", 40, "A"),
        isolate(3, "P1", "Urine", 25, "A"),
    ];
    let firsts = first_isolation(&rows, &IsolationFilter::All, IsolationKey::new(Period::Month));
    let kept: Vec<usize> = firsts.iter().map(|isolate| isolate.source_row).collect();
    assert_eq!(kept, vec![1, 2, 3]);

    let yearly = first_isolation(&rows, &IsolationFilter::All, IsolationKey::new(Period::Year));
    let kept: Vec<usize> = yearly.iter().map(|isolate| isolate.source_row).collect();
    assert_eq!(kept, vec![1, 3]);
}

#[test]
fn indicator_filter_uses_any_marker() {
    let mut meropenem = isolate(0, "P1", "Urine", 1, "Klebsiella pneumoniae");
    meropenem.groups.insert(OrganismGroup::Cre);
    meropenem.markers.insert(ResistanceMarker::Cmem);
    let mut ertapenem = isolate(1, "P2", "Urine", 2, "Escherichia coli");
    ertapenem.groups.insert(OrganismGroup::Cre);
    ertapenem.markers.insert(ResistanceMarker::Cetp);
    let clean = isolate(2, "P3", "Urine", 3, "Escherichia coli");
    let rows = vec![meropenem, ertapenem, clean];

    let firsts = first_isolation(
        &rows,
        &IsolationFilter::Indicator(Indicator::Cre),
        IsolationKey::new(Period::Year),
    );
    assert_eq!(firsts.len(), 2);

    let ecoli = first_isolation(
        &rows,
        &IsolationFilter::Organism("Escherichia coli".to_string()),
        IsolationKey::new(Period::Whole),
    );
    assert_eq!(ecoli.len(), 2);
}

fn arb_isolates() -> impl Strategy<Value = Vec<Isolate>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["P1", "P2", "P3"]),
            prop::sample::select(vec!["Sputum", "Urine"]),
            0i64..730,
            prop::sample::select(vec!["A", "B"]),
        ),
        0..60,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(row, (patient, specimen, day, organism))| {
                isolate(row, patient, specimen, day, organism)
            })
            .collect()
    })
}

fn arb_key() -> impl Strategy<Value = IsolationKey> {
    (
        prop::sample::select(vec![Period::Month, Period::Year, Period::Whole]),
        any::<bool>(),
    )
        .prop_map(|(period, by_organism)| IsolationKey {
            period,
            by_organism,
        })
}

proptest! {
    #[test]
    fn first_isolation_invariants(rows in arb_isolates(), key in arb_key()) {
        let firsts = first_isolation(&rows, &IsolationFilter::All, key);
        prop_assert!(firsts.len() <= rows.len());

        let keys: Vec<_> = firsts
            .iter()
            .map(|isolate| {
                (
                    isolate.patient_id.clone(),
                    isolate.specimen.clone(),
                    key.by_organism.then(|| isolate.organism.clone()),
                    isolate.bucket(key.period),
                )
            })
            .collect();
        let unique: BTreeSet<_> = keys.iter().cloned().collect();
        prop_assert_eq!(unique.len(), keys.len());

        // No dropped isolate is earlier than the kept one for its key.
        for row in &rows {
            let row_key = (
                row.patient_id.clone(),
                row.specimen.clone(),
                key.by_organism.then(|| row.organism.clone()),
                row.bucket(key.period),
            );
            let position = keys.iter().position(|k| *k == row_key);
            prop_assert!(position.is_some());
            if let Some(position) = position {
                prop_assert!(firsts[position].performed_at <= row.performed_at);
            }
        }

        let again = first_isolation(firsts.iter().copied(), &IsolationFilter::All, key);
        prop_assert_eq!(again, firsts);
    }
}
