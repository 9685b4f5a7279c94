//! Tests for row expansion and indicator flags.

use mdro_ingest::RawReport;
use mdro_model::{
    Indicator, OrganismGroup, PipelineOptions, ResistanceMarker, ResistanceScope, WHOLE_BLOOD,
};
use mdro_transform::{isolate_columns, isolate_frame, organism_groups, preprocess};

const MIXED_REPORT: &str = "동정결과: Staphylococcus aureus\n\
항생제 감수성결과\n\
-------------\n\
Oxacillin >=4 (R)\n\
\n\
(최종보고)\n\
동정결과: Enterococcus faecium, 정도: Few\n\
항생제 감수성결과\n\
-------------\n\
Vancomycin >=32 (R)\n";

fn raw(row: usize, patient: &str, specimen: &str, at: &str, text: &str) -> RawReport {
    RawReport {
        source_row: row,
        patient_id: patient.to_string(),
        specimen: specimen.to_string(),
        performed_at: at.to_string(),
        result_text: text.to_string(),
    }
}

fn sample_rows() -> Vec<RawReport> {
    vec![
        raw(0, "P1", "Whole Blood(PICC1)", "2023-03-01 09:00", MIXED_REPORT),
        raw(1, "P2", "Sputum", "2023-03-02", "동정결과: No Growth"),
        raw(2, "P3", "Urine", "bad", "동정결과: Escherichia coli"),
        raw(3, " ", "Urine", "2023-03-03", "동정결과: Escherichia coli"),
        raw(4, "P4", "Urine", "20230304", "검체 부적합"),
        raw(
            5,
            "P5",
            "Urine",
            "2023/03/05",
            "동정결과: Klebsiella pneumoniae\n항생제 감수성결과\n---\nMeropenem 8 (R)\n",
        ),
    ]
}

#[test]
fn expands_and_flags_per_organism_block() {
    let result = preprocess(&sample_rows(), &PipelineOptions::default());
    let stats = &result.stats;
    assert_eq!(stats.input_rows, 6);
    assert_eq!(stats.skipped_missing_timestamp, 1);
    assert_eq!(stats.skipped_missing_patient, 1);
    assert_eq!(stats.no_growth_reports, 1);
    assert_eq!(stats.unparsed_reports, 1);
    assert_eq!(stats.isolates, 3);
    assert_eq!(stats.reports_used(), 4);

    let aureus = &result.isolates[0];
    assert_eq!(aureus.specimen, WHOLE_BLOOD);
    assert!(aureus.in_group(OrganismGroup::Sau));
    assert!(aureus.has_marker(ResistanceMarker::Oxa));
    assert!(!aureus.has_marker(ResistanceMarker::Svan));
    assert!(aureus.is_flagged(Indicator::Mrsa));

    let faecium = &result.isolates[1];
    assert_eq!(faecium.source_row, 0);
    assert_eq!(faecium.performed_at, aureus.performed_at);
    assert!(faecium.is_flagged(Indicator::Vre));

    let kleb = &result.isolates[2];
    assert!(kleb.in_group(OrganismGroup::Cre));
    assert!(kleb.has_marker(ResistanceMarker::Cmem));
    assert!(kleb.is_flagged(Indicator::Cre));

    assert_eq!(stats.marker_counts.get("OXA(R)"), Some(&1));
    assert_eq!(stats.group_counts.get("CRE"), Some(&1));
}

#[test]
fn report_scope_reads_other_blocks() {
    let options = PipelineOptions::default().with_resistance_scope(ResistanceScope::Report);
    let result = preprocess(&sample_rows(), &options);
    let aureus = &result.isolates[0];
    assert!(aureus.has_marker(ResistanceMarker::Svan));
    assert!(aureus.is_flagged(Indicator::Vrsa));
}

#[test]
fn markers_only_apply_to_matching_groups() {
    let rows = vec![raw(
        0,
        "P1",
        "Sputum",
        "2023-01-01",
        "동정결과: Pseudomonas aeruginosa\n항생제 감수성결과\n---\nImipenem 16 (R)\nOxacillin 4 (R)\n",
    )];
    let result = preprocess(&rows, &PipelineOptions::default());
    let isolate = &result.isolates[0];
    let markers: Vec<ResistanceMarker> = isolate.markers.iter().copied().collect();
    assert_eq!(markers, vec![ResistanceMarker::Pimp]);
}

#[test]
fn organism_groups_use_substring_match() {
    assert!(organism_groups("Escherichia coli (ESBL)").contains(&OrganismGroup::Cre));
    assert!(organism_groups("MRSA Staphylococcus aureus").contains(&OrganismGroup::Sau));
    assert!(organism_groups("Candida albicans").is_empty());
}

#[test]
fn frame_has_flag_columns() {
    let result = preprocess(&sample_rows(), &PipelineOptions::default());
    let frame = isolate_frame(&result.isolates).expect("frame");
    assert_eq!(frame.height(), 3);
    let names: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, isolate_columns());
    let oxa = frame
        .column("OXA(R)")
        .expect("column")
        .i32()
        .expect("i32")
        .get(0);
    assert_eq!(oxa, Some(1));
}

#[test]
fn frame_keeps_fractional_seconds() {
    let rows = vec![
        raw(0, "P1", "Urine", "2023-03-01 09:00:00.250", "동정결과: Escherichia coli"),
        raw(1, "P2", "Urine", "2023-03-02 10:30", "동정결과: Escherichia coli"),
    ];
    let result = preprocess(&rows, &PipelineOptions::default());
    let frame = isolate_frame(&result.isolates).expect("frame");
    let written: Vec<Option<&str>> = frame
        .column("performed_at")
        .expect("column")
        .str()
        .expect("str")
        .into_iter()
        .collect();
    assert_eq!(
        written,
        vec![Some("2023-03-01 09:00:00.250"), Some("2023-03-02 10:30:00")]
    );
}

#[test]
fn isolate_column_layout() {
    insta::assert_snapshot!(
        isolate_columns().join(","),
        @"source_row,patient_id,specimen,performed_at,organism,EFU,EFA,PSA,ABA,SAU,CRE,EVAN(R),PIMP(R),PMEM(R),AIMP(R),AMEM(R),OXA(R),SVAN(R),CIMP(R),CMEM(R),CETP(R),result_text"
    );
}
