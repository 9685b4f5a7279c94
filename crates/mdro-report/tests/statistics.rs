//! Tests for organism rankings and susceptibility statistics.

mod common;

use mdro_report::{
    specimen_organism_counts, susceptibility_frame, susceptibility_summary, top_organisms,
    write_frame_csv, write_json, yearly_organism_totals,
};
use mdro_model::ResistanceScope;
use tempfile::TempDir;

use common::{isolate, with_text};

const ECOLI: &str = "Escherichia coli";
const KLEB: &str = "Klebsiella pneumoniae";

fn sample() -> Vec<mdro_model::Isolate> {
    vec![
        isolate(0, "P1", "Urine", (2022, 1, 1), ECOLI, &[]),
        isolate(1, "P1", "Urine", (2022, 6, 1), ECOLI, &[]),
        isolate(2, "P1", "Urine", (2023, 1, 1), ECOLI, &[]),
        isolate(3, "P2", "Urine", (2022, 2, 1), ECOLI, &[]),
        isolate(4, "P2", "Sputum", (2022, 2, 1), KLEB, &[]),
        isolate(5, "P3", "Sputum", (2022, 3, 1), KLEB, &[]),
        isolate(6, "P4", "Wound", (2023, 3, 1), "Serratia marcescens", &[]),
    ]
}

#[test]
fn top_organisms_rank_whole_period_first_isolations() {
    let top = top_organisms(&sample(), 2);
    assert_eq!(top.len(), 2);
    // Equal counts fall back to name order.
    assert_eq!(top[0].organism, ECOLI);
    assert_eq!(top[0].count, 2);
    assert_eq!(top[1].organism, KLEB);
    assert_eq!(top[1].count, 2);
}

#[test]
fn specimen_counts_are_per_year() {
    let rows = specimen_organism_counts(&sample());
    assert_eq!(rows[0].year, 2022);
    assert_eq!(rows[0].specimen, "Sputum");
    assert_eq!(rows[0].organism, KLEB);
    assert_eq!(rows[0].count, 2);
    let urine_2022 = rows
        .iter()
        .find(|row| row.year == 2022 && row.specimen == "Urine")
        .expect("urine row");
    assert_eq!(urine_2022.count, 2);
    assert_eq!(rows.len(), 4);

    let totals = yearly_organism_totals(&rows);
    let flat: Vec<(i32, &str, usize)> = totals
        .iter()
        .map(|row| (row.year, row.organism.as_str(), row.count))
        .collect();
    assert_eq!(
        flat,
        vec![
            (2022, ECOLI, 2),
            (2022, KLEB, 2),
            (2023, ECOLI, 1),
            (2023, "Serratia marcescens", 1),
        ]
    );
}

#[test]
fn susceptibility_counts_yearly_first_isolations() {
    let resistant = "동정결과: Escherichia coli\n항생제 감수성결과\n---\nAmpicillin >=32 (R)\nAmikacin <=2 (S)\nESBL Pos (+)\n";
    let susceptible = "동정결과: Escherichia coli\n항생제 감수성결과\n---\nAmpicillin 4 (S)\nAmikacin 8 (I)\n";
    let rows = vec![
        with_text(isolate(0, "P1", "Urine", (2022, 1, 1), ECOLI, &[]), resistant),
        // Repeat culture in the same year is not counted.
        with_text(isolate(1, "P1", "Urine", (2022, 5, 1), ECOLI, &[]), susceptible),
        with_text(isolate(2, "P2", "Urine", (2022, 1, 1), ECOLI, &[]), susceptible),
        with_text(isolate(3, "P3", "Urine", (2022, 1, 1), KLEB, &[]), resistant),
    ];
    let summary = susceptibility_summary(&rows, ECOLI, ResistanceScope::Organism);
    assert_eq!(summary.isolates, 2);
    let names: Vec<&str> = summary.rows.iter().map(|row| row.antibiotic.as_str()).collect();
    assert_eq!(names, vec!["Amikacin", "Ampicillin", "ESBL"]);

    let ampicillin = &summary.rows[1];
    assert_eq!((ampicillin.susceptible, ampicillin.resistant), (1, 1));
    assert!((ampicillin.resistant_pct - 50.0).abs() < 1e-9);
    let esbl = &summary.rows[2];
    assert_eq!(esbl.total, 1);
    assert_eq!(esbl.resistant_pct, 0.0);

    let dir = TempDir::new().expect("temp dir");
    let mut frame = susceptibility_frame(&summary).expect("frame");
    let csv_path = dir.path().join("out").join("sir.csv");
    write_frame_csv(&csv_path, &mut frame).expect("write csv");
    let written = std::fs::read_to_string(&csv_path).expect("read csv");
    assert!(written.starts_with("antibiotic,S,I,R,total,S_pct,I_pct,R_pct"));

    let json_path = dir.path().join("sir.json");
    write_json(&json_path, &summary).expect("write json");
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).expect("read json"))
            .expect("parse json");
    assert_eq!(value["isolates"], 2);
}

#[test]
fn susceptibility_reads_only_the_organism_block() {
    let report = "동정결과: Escherichia coli\n항생제 감수성결과\n---\nAmikacin <=2 (S)\n\n(최종보고)\n\
동정결과: Klebsiella pneumoniae\n항생제 감수성결과\n---\nAmikacin >=64 (R)\nESBL Pos (+)\n";
    let rows = vec![
        with_text(isolate(0, "P1", "Blood", (2023, 2, 1), ECOLI, &[]), report),
        with_text(isolate(0, "P1", "Blood", (2023, 2, 1), KLEB, &[]), report),
    ];

    let ecoli = susceptibility_summary(&rows, ECOLI, ResistanceScope::Organism);
    assert_eq!(ecoli.isolates, 1);
    let names: Vec<&str> = ecoli.rows.iter().map(|row| row.antibiotic.as_str()).collect();
    assert_eq!(names, vec!["Amikacin"]);
    assert_eq!((ecoli.rows[0].susceptible, ecoli.rows[0].resistant), (1, 0));

    let kleb = susceptibility_summary(&rows, KLEB, ResistanceScope::Organism);
    let amikacin = kleb
        .rows
        .iter()
        .find(|row| row.antibiotic == "Amikacin")
        .expect("amikacin row");
    assert_eq!((amikacin.susceptible, amikacin.resistant), (0, 1));
    assert!(kleb.rows.iter().any(|row| row.antibiotic == "ESBL"));

    // Report scope reads the whole text as before.
    let whole = susceptibility_summary(&rows, ECOLI, ResistanceScope::Report);
    assert_eq!(whole.rows[0].total, 1);
    assert!(whole.rows.iter().any(|row| row.antibiotic == "ESBL"));
}
